// Verification pipeline
//
// input -> evidence records -> weights -> fused score -> contradictions -> verdict
//
// Every stage is a pure function of its inputs. A Verifier holds only
// immutable configuration and can be shared across threads; each call builds
// its own evidence set and result.

use crate::attention::{AttentionWeightCalculator, AttentionWeights};
use crate::config::FusionConfig;
use crate::contradiction::{ContradictionDetector, ContradictionRecord, SeverityCounts};
use crate::error::Result;
use crate::evidence::{EvidenceSet, SourceKind};
use crate::fusion::FusionEngine;
use crate::input::VerificationInput;
use crate::normalizer::EvidenceNormalizer;
use crate::temporal::TemporalConsistencyScorer;
use crate::verdict::{Verdict, VerdictBasis, VerdictClassifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete outcome of one verification request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub final_score: f64,
    pub weights_used: AttentionWeights,
    pub contributions: BTreeMap<SourceKind, f64>,
    pub dominant_source: SourceKind,
    /// Detection order
    pub contradictions: Vec<ContradictionRecord>,
    pub verdict: Verdict,
    pub verdict_confidence: f64,
    pub verdict_basis: VerdictBasis,
}

impl FusionResult {
    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::from_records(&self.contradictions)
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        let counts = self.severity_counts();
        if counts.total() == 0 {
            format!(
                "{} (confidence {:.2}), score {:.3}, {} source(s), no contradictions",
                self.verdict,
                self.verdict_confidence,
                self.final_score,
                self.weights_used.len()
            )
        } else {
            format!(
                "{} (confidence {:.2}), score {:.3}, {} source(s), {} contradiction(s) ({} high, {} medium, {} low)",
                self.verdict,
                self.verdict_confidence,
                self.final_score,
                self.weights_used.len(),
                counts.total(),
                counts.high,
                counts.medium,
                counts.low
            )
        }
    }
}

pub struct Verifier {
    normalizer: EvidenceNormalizer,
    temporal: TemporalConsistencyScorer,
    engine: FusionEngine,
    detector: ContradictionDetector,
    classifier: VerdictClassifier,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::from_valid_config(FusionConfig::default())
    }
}

impl Verifier {
    /// Build a verifier from a configuration
    ///
    /// # Errors
    /// `InvalidConfig` if the configuration fails validation.
    pub fn new(config: FusionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: FusionConfig) -> Self {
        let detector = ContradictionDetector::new(&config);
        Self {
            normalizer: EvidenceNormalizer,
            temporal: TemporalConsistencyScorer::new(config.temporal),
            engine: FusionEngine::new(AttentionWeightCalculator::new(config.priors)),
            detector,
            classifier: VerdictClassifier::new(config.verdict),
        }
    }

    /// Replace the contradiction rule registry
    pub fn with_detector(mut self, detector: ContradictionDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Run both evidence producers and assemble the evidence set
    ///
    /// # Errors
    /// `MalformedEvidence` if any present payload is out of range.
    pub fn collect_evidence(&self, input: &VerificationInput) -> Result<EvidenceSet> {
        let temporal = self.temporal.score(input.temporal.as_ref())?;
        let scored = self.normalizer.normalize(input)?;
        EvidenceSet::from_records(std::iter::once(temporal).chain(scored))
    }

    /// Verify one request end to end
    ///
    /// # Errors
    /// `MalformedEvidence` for invalid payloads, `NoEvidence` when no source
    /// produced anything.
    pub fn verify(&self, input: &VerificationInput) -> Result<FusionResult> {
        let evidence = self.collect_evidence(input)?;
        self.verify_evidence(&evidence)
    }

    /// Verify an already assembled evidence set
    pub fn verify_evidence(&self, evidence: &EvidenceSet) -> Result<FusionResult> {
        let fused = self.engine.fuse(evidence)?;
        let contradictions = self.detector.detect(evidence);
        let outcome = self.classifier.classify(fused.final_score, &contradictions);

        let result = FusionResult {
            final_score: fused.final_score,
            weights_used: fused.weights_used,
            contributions: fused.contributions,
            dominant_source: fused.dominant_source,
            contradictions,
            verdict: outcome.verdict,
            verdict_confidence: outcome.confidence,
            verdict_basis: outcome.basis,
        };

        tracing::info!("Verification complete: {}", result.summary());

        Ok(result)
    }
}
