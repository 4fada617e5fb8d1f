// Contradiction Detector
//
// Scans the full evidence set (independently of fusion weights) for specific
// conflict patterns. Rules live in an ordered registry and are evaluated in
// that fixed order, so output order is deterministic: records appear in rule
// order, and within a rule in canonical source order.
//
// Adding a contradiction type = implementing ContradictionRule and appending
// it with `with_rule`; fusion logic is untouched.

pub mod rules;

use crate::config::FusionConfig;
use crate::evidence::{EvidenceSet, SourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use rules::{
    FactCheckContradictionRule, SimilarityEvidenceConflictRule, SourceDisagreementRule,
    TemporalMismatchRule, UnsupportedClaimRule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContradictionKind {
    TemporalMismatch,
    FactcheckContradiction,
    SourceDisagreement,
    SimilarityEvidenceConflict,
    UnsupportedClaim,
}

impl fmt::Display for ContradictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TemporalMismatch => "TEMPORAL_MISMATCH",
            Self::FactcheckContradiction => "FACTCHECK_CONTRADICTION",
            Self::SourceDisagreement => "SOURCE_DISAGREEMENT",
            Self::SimilarityEvidenceConflict => "SIMILARITY_EVIDENCE_CONFLICT",
            Self::UnsupportedClaim => "UNSUPPORTED_CLAIM",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,    // Informational, never changes the verdict
    Medium, // Lowers verdict confidence
    High,   // Forces a false-leaning verdict
}

/// A detected conflict between evidence sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionRecord {
    #[serde(rename = "type")]
    pub kind: ContradictionKind,
    pub severity: Severity,
    pub confidence: f64,
    /// Display only
    pub description: String,
    pub involved_sources: BTreeSet<SourceKind>,
}

impl ContradictionRecord {
    pub fn new(
        kind: ContradictionKind,
        severity: Severity,
        confidence: f64,
        description: impl Into<String>,
        involved_sources: impl IntoIterator<Item = SourceKind>,
    ) -> Self {
        Self {
            kind,
            severity,
            confidence,
            description: description.into(),
            involved_sources: involved_sources.into_iter().collect(),
        }
    }
}

/// One independent conflict pattern
pub trait ContradictionRule: Send + Sync {
    /// Rule name for logging
    fn name(&self) -> &'static str;

    /// Evaluate against the complete evidence set.
    ///
    /// Only emits records whose confidence reaches the rule's own threshold.
    fn evaluate(&self, evidence: &EvidenceSet) -> Vec<ContradictionRecord>;
}

/// Contradiction counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn from_records(records: &[ContradictionRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Ordered rule registry
pub struct ContradictionDetector {
    rules: Vec<Box<dyn ContradictionRule>>,
}

impl Default for ContradictionDetector {
    fn default() -> Self {
        Self::new(&FusionConfig::default())
    }
}

impl ContradictionDetector {
    /// Standard registry, in evaluation order:
    /// 1. Temporal mismatch
    /// 2. Fact-check contradiction
    /// 3. Source disagreement
    /// 4. Similarity/evidence conflict
    /// 5. Unsupported claim
    pub fn new(config: &FusionConfig) -> Self {
        Self::empty()
            .with_rule(TemporalMismatchRule::new(config))
            .with_rule(FactCheckContradictionRule::new(config))
            .with_rule(SourceDisagreementRule::new(config))
            .with_rule(SimilarityEvidenceConflictRule::new(config))
            .with_rule(UnsupportedClaimRule::new(config))
    }

    /// Registry with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after every rule already registered
    pub fn with_rule(mut self, rule: impl ContradictionRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule in registry order
    pub fn detect(&self, evidence: &EvidenceSet) -> Vec<ContradictionRecord> {
        let mut records = Vec::new();

        for rule in &self.rules {
            let found = rule.evaluate(evidence);
            if !found.is_empty() {
                tracing::debug!("Rule {} emitted {} contradiction(s)", rule.name(), found.len());
            }
            records.extend(found);
        }

        let counts = SeverityCounts::from_records(&records);
        tracing::debug!(
            "Contradiction detection: high={}, medium={}, low={}",
            counts.high,
            counts.medium,
            counts.low
        );

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{EvidenceRecord, Reading};

    struct AlwaysFires;

    impl ContradictionRule for AlwaysFires {
        fn name(&self) -> &'static str {
            "always_fires"
        }

        fn evaluate(&self, _evidence: &EvidenceSet) -> Vec<ContradictionRecord> {
            vec![ContradictionRecord::new(
                ContradictionKind::UnsupportedClaim,
                Severity::Low,
                1.0,
                "custom",
                Vec::<SourceKind>::new(),
            )]
        }
    }

    fn disagreeing_news_and_wiki() -> EvidenceSet {
        EvidenceSet::from_records(vec![
            EvidenceRecord::present(
                SourceKind::News,
                Reading::new(SourceKind::News, 0.9, 0.8).unwrap(),
            ),
            EvidenceRecord::present(
                SourceKind::Wikipedia,
                Reading::new(SourceKind::Wikipedia, 0.2, 0.8).unwrap(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_standard_registry_order() {
        let detector = ContradictionDetector::default();
        assert_eq!(
            detector.rule_names(),
            vec![
                "temporal_mismatch",
                "factcheck_contradiction",
                "source_disagreement",
                "similarity_evidence_conflict",
                "unsupported_claim",
            ]
        );
    }

    #[test]
    fn test_empty_evidence_has_no_contradictions() {
        let detector = ContradictionDetector::default();
        assert!(detector.detect(&EvidenceSet::default()).is_empty());
    }

    #[test]
    fn test_custom_rule_runs_after_standard_rules() {
        let detector = ContradictionDetector::default().with_rule(AlwaysFires);
        let records = detector.detect(&disagreeing_news_and_wiki());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ContradictionKind::SourceDisagreement);
        assert_eq!(records[1].description, "custom");
    }

    #[test]
    fn test_severity_counts() {
        let record = |kind, severity| {
            ContradictionRecord::new(kind, severity, 0.9, "x", Vec::<SourceKind>::new())
        };
        let records = vec![
            record(ContradictionKind::TemporalMismatch, Severity::High),
            record(ContradictionKind::FactcheckContradiction, Severity::High),
            record(ContradictionKind::SourceDisagreement, Severity::Medium),
            record(ContradictionKind::UnsupportedClaim, Severity::Low),
        ];

        let counts = SeverityCounts::from_records(&records);

        assert_eq!(counts, SeverityCounts { high: 2, medium: 1, low: 1 });
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = ContradictionRecord::new(
            ContradictionKind::TemporalMismatch,
            Severity::High,
            0.95,
            "dates differ",
            [SourceKind::Temporal],
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "TEMPORAL_MISMATCH");
        assert_eq!(json["severity"], "HIGH");
        assert_eq!(json["involved_sources"], serde_json::json!(["temporal"]));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
