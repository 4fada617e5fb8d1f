// Evidence data model
//
// One EvidenceRecord per source kind per request. Presence is a first-class
// state: an absent record has no Reading at all, so nothing downstream can
// mistake "no data" for a zero score.

use crate::error::{FusionError, Result};
use crate::input::DateSpan;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Display-only metadata passed through from the evidence producer
pub type RawMetadata = BTreeMap<String, serde_json::Value>;

/// Independent evidence source
///
/// Declaration order is the canonical order used for every ordered output
/// (weights, contributions, contradiction pairs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Temporal,
    TextImageSimilarity,
    News,
    Factcheck,
    Wikipedia,
    Web,
}

impl SourceKind {
    /// Every registered source kind, in canonical order
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Temporal,
        SourceKind::TextImageSimilarity,
        SourceKind::News,
        SourceKind::Factcheck,
        SourceKind::Wikipedia,
        SourceKind::Web,
    ];

    /// Design-time credibility prior for this source
    pub fn default_prior(self) -> f64 {
        match self {
            Self::Factcheck => 0.95,
            Self::News => 0.85,
            Self::Wikipedia => 0.80,
            Self::Temporal => 0.75,
            Self::TextImageSimilarity => 0.70,
            Self::Web => 0.60,
        }
    }

    /// Sources backed by an external information provider
    pub fn is_external(self) -> bool {
        matches!(
            self,
            Self::News | Self::Factcheck | Self::Wikipedia | Self::Web
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temporal => "temporal",
            Self::TextImageSimilarity => "text_image_similarity",
            Self::News => "news",
            Self::Factcheck => "factcheck",
            Self::Wikipedia => "wikipedia",
            Self::Web => "web",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and confidence of a present source, both validated to [0, 1]
///
/// Only constructible through [`Reading::new`] or deserialization, which
/// apply the same range check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedReading")]
pub struct Reading {
    score: f64,
    confidence: f64,
}

impl Reading {
    /// Validate and build a reading. Out-of-range or NaN values are rejected.
    pub fn new(source_kind: SourceKind, score: f64, confidence: f64) -> Result<Self> {
        check_unit_interval(source_kind, "score", score)?;
        check_unit_interval(source_kind, "confidence", confidence)?;
        Ok(Self { score, confidence })
    }

    /// Higher = more supportive of the claim / more consistent
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Producer's own certainty in `score`
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

#[derive(Deserialize)]
struct UncheckedReading {
    score: f64,
    confidence: f64,
}

impl TryFrom<UncheckedReading> for Reading {
    type Error = String;

    fn try_from(raw: UncheckedReading) -> std::result::Result<Self, Self::Error> {
        for (field, value) in [("score", raw.score), ("confidence", raw.confidence)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} = {} is outside [0, 1]", field, value));
            }
        }
        Ok(Self {
            score: raw.score,
            confidence: raw.confidence,
        })
    }
}

pub(crate) fn check_unit_interval(source_kind: SourceKind, field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FusionError::out_of_range(source_kind, field, value))
    }
}

/// Fact-check rating class parsed from a free-text verdict label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCheckRating {
    True,
    MostlyTrue,
    PartlyTrue,
    Mixture,
    MostlyFalse,
    False,
    Fake,
    Misleading,
    Incorrect,
    Unrated,
}

impl FactCheckRating {
    /// Phrases checked in order; more specific phrases come first so that
    /// "mostly false" is not read as "false".
    const PHRASES: [(&'static str, FactCheckRating); 18] = [
        ("untrue", FactCheckRating::False),
        ("not true", FactCheckRating::False),
        ("not correct", FactCheckRating::Incorrect),
        ("not accurate", FactCheckRating::Incorrect),
        ("inaccurate", FactCheckRating::Incorrect),
        ("mostly true", FactCheckRating::MostlyTrue),
        ("mostly false", FactCheckRating::MostlyFalse),
        ("partly true", FactCheckRating::PartlyTrue),
        ("half true", FactCheckRating::PartlyTrue),
        ("partly false", FactCheckRating::Mixture),
        ("mixture", FactCheckRating::Mixture),
        ("mixed", FactCheckRating::Mixture),
        ("pants on fire", FactCheckRating::False),
        ("misleading", FactCheckRating::Misleading),
        ("incorrect", FactCheckRating::Incorrect),
        ("fake", FactCheckRating::Fake),
        ("false", FactCheckRating::False),
        ("true", FactCheckRating::True),
    ];

    /// Classify a verdict label (case-insensitive)
    pub fn classify(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        Self::PHRASES
            .iter()
            .find(|(phrase, _)| label.contains(phrase))
            .map(|(_, rating)| *rating)
            .unwrap_or(FactCheckRating::Unrated)
    }

    /// Ratings that contradict the claim outright
    pub fn is_rated_false(self) -> bool {
        matches!(
            self,
            Self::False | Self::Fake | Self::Misleading | Self::Incorrect
        )
    }
}

/// Typed per-kind facts used by contradiction rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceDetail {
    Temporal {
        days_delta: i64,
        image_date: NaiveDate,
        text_date: DateSpan,
    },
    FactCheck {
        rating: FactCheckRating,
    },
}

/// One source's evidence for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub source_kind: SourceKind,
    /// None = source produced no finding
    pub reading: Option<Reading>,
    pub detail: Option<EvidenceDetail>,
    #[serde(default)]
    pub raw_metadata: RawMetadata,
}

impl EvidenceRecord {
    /// Record for a source that produced no finding
    pub fn absent(source_kind: SourceKind) -> Self {
        Self {
            source_kind,
            reading: None,
            detail: None,
            raw_metadata: RawMetadata::new(),
        }
    }

    pub fn present(source_kind: SourceKind, reading: Reading) -> Self {
        Self {
            source_kind,
            reading: Some(reading),
            detail: None,
            raw_metadata: RawMetadata::new(),
        }
    }

    pub fn with_detail(mut self, detail: EvidenceDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_raw_metadata(mut self, raw_metadata: RawMetadata) -> Self {
        self.raw_metadata = raw_metadata;
        self
    }

    pub fn is_present(&self) -> bool {
        self.reading.is_some()
    }

    pub fn score(&self) -> Option<f64> {
        self.reading.map(|r| r.score())
    }

    pub fn confidence(&self) -> Option<f64> {
        self.reading.map(|r| r.confidence())
    }
}

/// Complete evidence for one request: exactly one record per source kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceSet {
    records: Vec<EvidenceRecord>,
}

impl Default for EvidenceSet {
    fn default() -> Self {
        Self {
            records: SourceKind::ALL
                .iter()
                .map(|kind| EvidenceRecord::absent(*kind))
                .collect(),
        }
    }
}

impl EvidenceSet {
    /// Build from records; kinds not supplied are absent.
    ///
    /// Fails if the same source kind appears twice.
    pub fn from_records(records: impl IntoIterator<Item = EvidenceRecord>) -> Result<Self> {
        let mut set = Self::default();
        let mut seen = [false; SourceKind::ALL.len()];

        for record in records {
            let idx = record.source_kind.index();
            if seen[idx] {
                return Err(FusionError::MalformedEvidence {
                    source_kind: record.source_kind,
                    reason: "duplicate record for source".to_string(),
                });
            }
            seen[idx] = true;
            set.records[idx] = record;
        }

        Ok(set)
    }

    pub fn get(&self, kind: SourceKind) -> &EvidenceRecord {
        &self.records[kind.index()]
    }

    pub fn reading(&self, kind: SourceKind) -> Option<Reading> {
        self.get(kind).reading
    }

    /// Present records only, in canonical order
    pub fn present(&self) -> impl Iterator<Item = &EvidenceRecord> {
        self.records.iter().filter(|r| r.is_present())
    }

    pub fn present_kinds(&self) -> Vec<SourceKind> {
        self.present().map(|r| r.source_kind).collect()
    }

    pub fn present_count(&self) -> usize {
        self.present().count()
    }

    /// Days between image and text date, if the temporal source is present
    pub fn temporal_days_delta(&self) -> Option<i64> {
        let record = self.get(SourceKind::Temporal);
        if !record.is_present() {
            return None;
        }
        match record.detail {
            Some(EvidenceDetail::Temporal { days_delta, .. }) => Some(days_delta),
            _ => None,
        }
    }

    /// Parsed fact-check rating, if the fact-check source is present
    pub fn factcheck_rating(&self) -> Option<FactCheckRating> {
        let record = self.get(SourceKind::Factcheck);
        if !record.is_present() {
            return None;
        }
        match record.detail {
            Some(EvidenceDetail::FactCheck { rating }) => Some(rating),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_all() {
        let mut sorted = SourceKind::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, SourceKind::ALL.to_vec());
        for (i, kind) in SourceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_source_kind_serde_names() {
        let json = serde_json::to_string(&SourceKind::TextImageSimilarity).unwrap();
        assert_eq!(json, "\"text_image_similarity\"");
        let kind: SourceKind = serde_json::from_str("\"factcheck\"").unwrap();
        assert_eq!(kind, SourceKind::Factcheck);
        assert_eq!(SourceKind::Web.to_string(), "web");
    }

    #[test]
    fn test_reading_rejects_out_of_range() {
        assert!(Reading::new(SourceKind::News, 0.0, 1.0).is_ok());
        assert!(Reading::new(SourceKind::News, 1.0, 0.0).is_ok());

        let err = Reading::new(SourceKind::News, 1.2, 0.5).unwrap_err();
        assert!(matches!(
            err,
            FusionError::MalformedEvidence { source_kind: SourceKind::News, .. }
        ));
        assert!(Reading::new(SourceKind::Web, 0.5, -0.01).is_err());
        assert!(Reading::new(SourceKind::Web, f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_factcheck_rating_classification() {
        assert_eq!(FactCheckRating::classify("FALSE"), FactCheckRating::False);
        assert_eq!(FactCheckRating::classify("Mostly False"), FactCheckRating::MostlyFalse);
        assert_eq!(FactCheckRating::classify("mostly true"), FactCheckRating::MostlyTrue);
        assert_eq!(FactCheckRating::classify("Half True"), FactCheckRating::PartlyTrue);
        assert_eq!(FactCheckRating::classify("Pants on Fire!"), FactCheckRating::False);
        assert_eq!(FactCheckRating::classify("Misleading"), FactCheckRating::Misleading);
        assert_eq!(FactCheckRating::classify("True"), FactCheckRating::True);
        assert_eq!(FactCheckRating::classify("Unproven"), FactCheckRating::Unrated);

        // Negations must not be read as their positive phrase
        assert_eq!(FactCheckRating::classify("Untrue"), FactCheckRating::False);
        assert_eq!(FactCheckRating::classify("Not true"), FactCheckRating::False);
        assert_eq!(FactCheckRating::classify("NOT CORRECT"), FactCheckRating::Incorrect);
        assert_eq!(FactCheckRating::classify("Not accurate"), FactCheckRating::Incorrect);
        assert_eq!(FactCheckRating::classify("Inaccurate"), FactCheckRating::Incorrect);
        assert!(FactCheckRating::classify("Untrue").is_rated_false());
    }

    #[test]
    fn test_rated_false_class() {
        assert!(FactCheckRating::False.is_rated_false());
        assert!(FactCheckRating::Fake.is_rated_false());
        assert!(FactCheckRating::Misleading.is_rated_false());
        assert!(FactCheckRating::Incorrect.is_rated_false());
        assert!(!FactCheckRating::MostlyFalse.is_rated_false());
        assert!(!FactCheckRating::True.is_rated_false());
        assert!(!FactCheckRating::Unrated.is_rated_false());
    }

    #[test]
    fn test_default_set_is_all_absent() {
        let set = EvidenceSet::default();
        assert!(SourceKind::ALL.iter().all(|kind| !set.get(*kind).is_present()));
        assert_eq!(set.present_count(), 0);
        assert!(set.temporal_days_delta().is_none());
        assert!(set.factcheck_rating().is_none());
    }

    #[test]
    fn test_from_records_places_by_kind() {
        let news = EvidenceRecord::present(
            SourceKind::News,
            Reading::new(SourceKind::News, 0.9, 0.8).unwrap(),
        );
        let set = EvidenceSet::from_records(vec![news]).unwrap();

        assert_eq!(set.present_kinds(), vec![SourceKind::News]);
        assert_eq!(set.reading(SourceKind::News).unwrap().score(), 0.9);
        assert!(!set.get(SourceKind::Web).is_present());
    }

    #[test]
    fn test_reading_deserialization_is_validated() {
        let reading: Reading = serde_json::from_str(r#"{"score": 0.4, "confidence": 0.9}"#).unwrap();
        assert_eq!(reading.score(), 0.4);
        assert_eq!(reading.confidence(), 0.9);

        assert!(serde_json::from_str::<Reading>(r#"{"score": 1.7, "confidence": 0.9}"#).is_err());
        assert!(serde_json::from_str::<Reading>(r#"{"score": 0.5, "confidence": -0.2}"#).is_err());
        let record: EvidenceRecord = serde_json::from_str(
            r#"{"source_kind": "news", "reading": {"score": 0.7, "confidence": 0.9}, "detail": null}"#,
        )
        .unwrap();
        assert_eq!(record.score(), Some(0.7));
        assert!(serde_json::from_str::<EvidenceRecord>(
            r#"{"source_kind": "news", "reading": {"score": 1.7, "confidence": 0.9}, "detail": null}"#
        )
        .is_err());
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let reading = Reading::new(SourceKind::Web, 0.5, 0.5).unwrap();
        let result = EvidenceSet::from_records(vec![
            EvidenceRecord::present(SourceKind::Web, reading),
            EvidenceRecord::present(SourceKind::Web, reading),
        ]);
        assert!(result.is_err());
    }
}
