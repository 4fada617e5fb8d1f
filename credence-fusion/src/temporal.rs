// Temporal Consistency Scorer
//
// Converts an image capture date and a text-referenced date into a
// consistency score. Polarity matches every other source: 1.0 = dates agree,
// 0.0 = dates are at least one consistency horizon apart.
//
// Algorithm:
// 1. Either date missing => record absent
// 2. days_delta = |image - text| (distance to nearest boundary for a range,
//    0 when the image date falls inside the range)
// 3. score = max(0, 1 - days_delta / horizon)
// 4. confidence = weakest of the two date provenances

use crate::config::TemporalConfig;
use crate::contradiction::Severity;
use crate::error::{FusionError, Result};
use crate::evidence::{EvidenceDetail, EvidenceRecord, RawMetadata, Reading, SourceKind};
use crate::input::{DateProvenance, DateSpan, TemporalEvidence};
use chrono::NaiveDate;
use serde_json::json;

pub struct TemporalConsistencyScorer {
    config: TemporalConfig,
}

impl Default for TemporalConsistencyScorer {
    fn default() -> Self {
        Self::new(TemporalConfig::default())
    }
}

impl TemporalConsistencyScorer {
    pub fn new(config: TemporalConfig) -> Self {
        Self { config }
    }

    /// Produce the `temporal` evidence record
    ///
    /// # Errors
    /// `MalformedEvidence` if the text date range ends before it starts.
    pub fn score(&self, evidence: Option<&TemporalEvidence>) -> Result<EvidenceRecord> {
        let (image, text) = match evidence {
            Some(TemporalEvidence {
                image_date: Some(image),
                text_date: Some(text),
            }) => (image, text),
            _ => {
                tracing::debug!("Temporal evidence incomplete, source absent");
                return Ok(EvidenceRecord::absent(SourceKind::Temporal));
            }
        };

        let days_delta = days_delta(image.date, text.span)?;
        let score = self.consistency(days_delta);
        let confidence = self
            .provenance_confidence(image.provenance)
            .min(self.provenance_confidence(text.provenance));

        tracing::debug!(
            "Temporal consistency: image={}, text={:?}, days_delta={}, score={:.3}, confidence={:.2}",
            image.date,
            text.span,
            days_delta,
            score,
            confidence
        );

        let mut raw_metadata = RawMetadata::new();
        raw_metadata.insert("image_date".to_string(), json!(image.date.to_string()));
        raw_metadata.insert("text_date".to_string(), json!(text.span));
        raw_metadata.insert("days_delta".to_string(), json!(days_delta));

        let reading = Reading::new(SourceKind::Temporal, score, confidence)?;
        Ok(EvidenceRecord::present(SourceKind::Temporal, reading)
            .with_detail(EvidenceDetail::Temporal {
                days_delta,
                image_date: image.date,
                text_date: text.span,
            })
            .with_raw_metadata(raw_metadata))
    }

    /// Monotonically decreasing map from day delta to consistency
    pub fn consistency(&self, days_delta: i64) -> f64 {
        (1.0 - days_delta as f64 / self.config.consistency_horizon_days).max(0.0)
    }

    /// Severity of the mismatch, None when the dates are close enough
    pub fn severity(&self, days_delta: i64) -> Option<Severity> {
        if days_delta > self.config.mismatch_high_days {
            Some(Severity::High)
        } else if days_delta > self.config.mismatch_medium_days {
            Some(Severity::Medium)
        } else {
            None
        }
    }

    fn provenance_confidence(&self, provenance: DateProvenance) -> f64 {
        match provenance {
            DateProvenance::Exif => self.config.exif_confidence,
            DateProvenance::Explicit => self.config.explicit_confidence,
            DateProvenance::Relative => self.config.relative_confidence,
        }
    }
}

/// Absolute distance in days from `image` to `span`
pub fn days_delta(image: NaiveDate, span: DateSpan) -> Result<i64> {
    match span {
        DateSpan::Day(day) => Ok((image - day).num_days().abs()),
        DateSpan::Range { start, end } => {
            if start > end {
                return Err(FusionError::MalformedEvidence {
                    source_kind: SourceKind::Temporal,
                    reason: format!("text date range ends ({}) before it starts ({})", end, start),
                });
            }
            if image < start {
                Ok((start - image).num_days())
            } else if image > end {
                Ok((image - end).num_days())
            } else {
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ImageDate, TextDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_either_date_is_absent() {
        let scorer = TemporalConsistencyScorer::default();

        assert!(!scorer.score(None).unwrap().is_present());

        let only_image = TemporalEvidence {
            image_date: Some(ImageDate {
                date: date(2024, 1, 1),
                provenance: DateProvenance::Exif,
            }),
            text_date: None,
        };
        let record = scorer.score(Some(&only_image)).unwrap();
        assert!(!record.is_present());
        assert!(record.detail.is_none());
    }

    #[test]
    fn test_nine_year_gap_scores_zero() {
        let scorer = TemporalConsistencyScorer::default();
        let evidence = TemporalEvidence::exact(date(2015, 1, 1), date(2024, 1, 1));

        let record = scorer.score(Some(&evidence)).unwrap();

        assert_eq!(record.score(), Some(0.0));
        assert_eq!(record.confidence(), Some(0.95));
        assert_eq!(
            record.detail,
            Some(EvidenceDetail::Temporal {
                days_delta: 3287,
                image_date: date(2015, 1, 1),
                text_date: DateSpan::Day(date(2024, 1, 1)),
            })
        );
        assert_eq!(record.raw_metadata["days_delta"], json!(3287));
    }

    #[test]
    fn test_same_day_is_fully_consistent() {
        let scorer = TemporalConsistencyScorer::default();
        let evidence = TemporalEvidence::exact(date(2024, 3, 10), date(2024, 3, 10));
        let record = scorer.score(Some(&evidence)).unwrap();
        assert_eq!(record.score(), Some(1.0));
    }

    #[test]
    fn test_consistency_is_linear_then_floored() {
        let scorer = TemporalConsistencyScorer::default();
        assert!((scorer.consistency(73) - 0.8).abs() < 1e-12);
        assert_eq!(scorer.consistency(365), 0.0);
        assert_eq!(scorer.consistency(10_000), 0.0);
        assert!(scorer.consistency(10) > scorer.consistency(11));
    }

    #[test]
    fn test_severity_bands() {
        let scorer = TemporalConsistencyScorer::default();
        assert_eq!(scorer.severity(0), None);
        assert_eq!(scorer.severity(30), None);
        assert_eq!(scorer.severity(31), Some(Severity::Medium));
        assert_eq!(scorer.severity(365), Some(Severity::Medium));
        assert_eq!(scorer.severity(366), Some(Severity::High));
    }

    #[test]
    fn test_range_uses_nearest_boundary() {
        let span = DateSpan::Range {
            start: date(2024, 1, 1),
            end: date(2024, 1, 31),
        };
        assert_eq!(days_delta(date(2024, 1, 15), span).unwrap(), 0);
        assert_eq!(days_delta(date(2023, 12, 22), span).unwrap(), 10);
        assert_eq!(days_delta(date(2024, 2, 5), span).unwrap(), 5);
    }

    #[test]
    fn test_inverted_range_is_malformed() {
        let span = DateSpan::Range {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
        };
        let err = days_delta(date(2024, 1, 15), span).unwrap_err();
        assert!(matches!(
            err,
            FusionError::MalformedEvidence { source_kind: SourceKind::Temporal, .. }
        ));
    }

    #[test]
    fn test_relative_date_lowers_confidence() {
        let scorer = TemporalConsistencyScorer::default();
        let evidence = TemporalEvidence {
            image_date: Some(ImageDate {
                date: date(2024, 1, 1),
                provenance: DateProvenance::Exif,
            }),
            text_date: Some(TextDate {
                span: DateSpan::Day(date(2024, 1, 2)),
                provenance: DateProvenance::Relative,
            }),
        };
        let record = scorer.score(Some(&evidence)).unwrap();
        assert_eq!(record.confidence(), Some(0.6));
    }
}
