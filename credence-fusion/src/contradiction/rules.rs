// Standard contradiction rules
//
// Each rule has an explicit trigger, a severity mapping, and a named minimum
// confidence below which it stays silent. Absent sources never trigger a rule
// by themselves having a score; only UnsupportedClaimRule looks at absence,
// at a configurable severity (MEDIUM by default).

use super::{ContradictionKind, ContradictionRecord, ContradictionRule, Severity};
use crate::config::FusionConfig;
use crate::evidence::{EvidenceSet, SourceKind};
use crate::temporal::TemporalConsistencyScorer;

/// External sources compared pairwise for disagreement, in canonical order
const DISAGREEMENT_SOURCES: [SourceKind; 3] =
    [SourceKind::News, SourceKind::Wikipedia, SourceKind::Web];

fn below_threshold(rule: &str, confidence: f64, min_confidence: f64) -> bool {
    if confidence < min_confidence {
        tracing::debug!(
            "Rule {} suppressed: confidence {:.2} < {:.2}",
            rule,
            confidence,
            min_confidence
        );
        true
    } else {
        false
    }
}

/// Image capture date far from the date the text claims
///
/// HIGH beyond the high band, MEDIUM beyond the medium band.
pub struct TemporalMismatchRule {
    scorer: TemporalConsistencyScorer,
    min_confidence: f64,
}

impl TemporalMismatchRule {
    pub fn new(config: &FusionConfig) -> Self {
        Self {
            scorer: TemporalConsistencyScorer::new(config.temporal.clone()),
            min_confidence: config.contradictions.temporal_min_confidence,
        }
    }
}

impl ContradictionRule for TemporalMismatchRule {
    fn name(&self) -> &'static str {
        "temporal_mismatch"
    }

    fn evaluate(&self, evidence: &EvidenceSet) -> Vec<ContradictionRecord> {
        let (Some(days_delta), Some(reading)) = (
            evidence.temporal_days_delta(),
            evidence.reading(SourceKind::Temporal),
        ) else {
            return Vec::new();
        };

        let Some(severity) = self.scorer.severity(days_delta) else {
            return Vec::new();
        };
        if below_threshold(self.name(), reading.confidence(), self.min_confidence) {
            return Vec::new();
        }

        vec![ContradictionRecord::new(
            ContradictionKind::TemporalMismatch,
            severity,
            reading.confidence(),
            format!(
                "Image date differs from the claimed date by {} days",
                days_delta
            ),
            [SourceKind::Temporal],
        )]
    }
}

/// Fact-check publisher rated the claim false
pub struct FactCheckContradictionRule {
    min_confidence: f64,
}

impl FactCheckContradictionRule {
    pub fn new(config: &FusionConfig) -> Self {
        Self {
            min_confidence: config.contradictions.factcheck_min_confidence,
        }
    }
}

impl ContradictionRule for FactCheckContradictionRule {
    fn name(&self) -> &'static str {
        "factcheck_contradiction"
    }

    fn evaluate(&self, evidence: &EvidenceSet) -> Vec<ContradictionRecord> {
        let (Some(rating), Some(reading)) = (
            evidence.factcheck_rating(),
            evidence.reading(SourceKind::Factcheck),
        ) else {
            return Vec::new();
        };

        if !rating.is_rated_false() {
            return Vec::new();
        }
        if below_threshold(self.name(), reading.confidence(), self.min_confidence) {
            return Vec::new();
        }

        let label = evidence
            .get(SourceKind::Factcheck)
            .raw_metadata
            .get("verdict_label")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{:?}", rating));

        vec![ContradictionRecord::new(
            ContradictionKind::FactcheckContradiction,
            Severity::High,
            reading.confidence(),
            format!("Fact-check rated the claim '{}'", label),
            [SourceKind::Factcheck],
        )]
    }
}

/// Two external sources whose scores are far apart
///
/// One MEDIUM record per disagreeing pair; confidence is the weaker of the
/// pair's confidences.
pub struct SourceDisagreementRule {
    threshold: f64,
    min_confidence: f64,
}

impl SourceDisagreementRule {
    pub fn new(config: &FusionConfig) -> Self {
        Self {
            threshold: config.contradictions.disagreement_threshold,
            min_confidence: config.contradictions.disagreement_min_confidence,
        }
    }
}

impl ContradictionRule for SourceDisagreementRule {
    fn name(&self) -> &'static str {
        "source_disagreement"
    }

    fn evaluate(&self, evidence: &EvidenceSet) -> Vec<ContradictionRecord> {
        let present: Vec<_> = DISAGREEMENT_SOURCES
            .iter()
            .filter_map(|kind| evidence.reading(*kind).map(|r| (*kind, r)))
            .collect();

        let mut records = Vec::new();
        for (i, (kind_a, a)) in present.iter().enumerate() {
            for (kind_b, b) in &present[i + 1..] {
                let gap = (a.score() - b.score()).abs();
                if gap <= self.threshold {
                    continue;
                }
                let confidence = a.confidence().min(b.confidence());
                if below_threshold(self.name(), confidence, self.min_confidence) {
                    continue;
                }
                records.push(ContradictionRecord::new(
                    ContradictionKind::SourceDisagreement,
                    Severity::Medium,
                    confidence,
                    format!(
                        "{} ({:.2}) and {} ({:.2}) disagree by {:.2}",
                        kind_a, a.score(), kind_b, b.score(), gap
                    ),
                    [*kind_a, *kind_b],
                ));
            }
        }
        records
    }
}

/// Image matches the claim's subject but not its time: the recycled-image
/// signature
pub struct SimilarityEvidenceConflictRule {
    similarity_high: f64,
    temporal_low: f64,
    min_confidence: f64,
}

impl SimilarityEvidenceConflictRule {
    pub fn new(config: &FusionConfig) -> Self {
        Self {
            similarity_high: config.contradictions.similarity_high,
            temporal_low: config.contradictions.temporal_low,
            min_confidence: config.contradictions.similarity_conflict_min_confidence,
        }
    }
}

impl ContradictionRule for SimilarityEvidenceConflictRule {
    fn name(&self) -> &'static str {
        "similarity_evidence_conflict"
    }

    fn evaluate(&self, evidence: &EvidenceSet) -> Vec<ContradictionRecord> {
        let (Some(similarity), Some(temporal)) = (
            evidence.reading(SourceKind::TextImageSimilarity),
            evidence.reading(SourceKind::Temporal),
        ) else {
            return Vec::new();
        };

        if similarity.score() < self.similarity_high || temporal.score() > self.temporal_low {
            return Vec::new();
        }
        let confidence = similarity.confidence().min(temporal.confidence());
        if below_threshold(self.name(), confidence, self.min_confidence) {
            return Vec::new();
        }

        vec![ContradictionRecord::new(
            ContradictionKind::SimilarityEvidenceConflict,
            Severity::High,
            confidence,
            format!(
                "Image matches the claim content (similarity {:.2}) but not its time (temporal consistency {:.2})",
                similarity.score(), temporal.score()
            ),
            [SourceKind::TextImageSimilarity, SourceKind::Temporal],
        )]
    }
}

/// Image matches the claim but no external source reports on it at all
pub struct UnsupportedClaimRule {
    similarity_high: f64,
    min_confidence: f64,
    severity: Severity,
}

impl UnsupportedClaimRule {
    pub fn new(config: &FusionConfig) -> Self {
        Self {
            similarity_high: config.contradictions.similarity_high,
            min_confidence: config.contradictions.unsupported_claim_min_confidence,
            severity: config.contradictions.unsupported_claim_severity,
        }
    }
}

impl ContradictionRule for UnsupportedClaimRule {
    fn name(&self) -> &'static str {
        "unsupported_claim"
    }

    fn evaluate(&self, evidence: &EvidenceSet) -> Vec<ContradictionRecord> {
        let Some(similarity) = evidence.reading(SourceKind::TextImageSimilarity) else {
            return Vec::new();
        };

        let has_external = evidence.present().any(|r| r.source_kind.is_external());
        if has_external || similarity.score() < self.similarity_high {
            return Vec::new();
        }
        if below_threshold(self.name(), similarity.confidence(), self.min_confidence) {
            return Vec::new();
        }

        vec![ContradictionRecord::new(
            ContradictionKind::UnsupportedClaim,
            self.severity,
            similarity.confidence(),
            format!(
                "Image matches the claim (similarity {:.2}) but no external source reports on it",
                similarity.score()
            ),
            [SourceKind::TextImageSimilarity],
        )]
    }
}
