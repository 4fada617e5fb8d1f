//! Fusion configuration
//!
//! Every numeric threshold used by the core lives here. The defaults are the
//! illustrative constants of the credibility model; none of them are
//! calibrated, so deployments may override any of them from TOML.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [fusion.priors]
//! web = 0.5
//!
//! [fusion.contradictions]
//! disagreement_threshold = 0.4
//! ```

use crate::contradiction::Severity;
use crate::error::{FusionError, Result};
use crate::evidence::SourceKind;
use credence_common::config::LoggingConfig;
use serde::Deserialize;

/// Top-level config file layout for the `credence` binary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub fusion: FusionConfig,
}

/// All tunable constants of the fusion core
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub priors: PriorTable,
    pub temporal: TemporalConfig,
    pub contradictions: ContradictionConfig,
    pub verdict: VerdictConfig,
}

impl FusionConfig {
    /// Reject configurations that would break the weighting or bucketing
    /// invariants.
    pub fn validate(&self) -> Result<()> {
        for kind in SourceKind::ALL {
            let prior = self.priors.get(kind);
            if !(prior > 0.0 && prior <= 1.0) {
                return Err(FusionError::InvalidConfig(format!(
                    "prior for {} must be in (0, 1], got {}",
                    kind, prior
                )));
            }
        }

        let t = &self.temporal;
        if !(t.consistency_horizon_days > 0.0 && t.consistency_horizon_days.is_finite()) {
            return Err(FusionError::InvalidConfig(format!(
                "temporal.consistency_horizon_days must be positive, got {}",
                t.consistency_horizon_days
            )));
        }
        if t.mismatch_medium_days < 0 || t.mismatch_medium_days >= t.mismatch_high_days {
            return Err(FusionError::InvalidConfig(format!(
                "temporal mismatch bands must satisfy 0 <= medium ({}) < high ({})",
                t.mismatch_medium_days, t.mismatch_high_days
            )));
        }
        unit("temporal.exif_confidence", t.exif_confidence)?;
        unit("temporal.explicit_confidence", t.explicit_confidence)?;
        unit("temporal.relative_confidence", t.relative_confidence)?;

        let c = &self.contradictions;
        unit("contradictions.disagreement_threshold", c.disagreement_threshold)?;
        unit("contradictions.similarity_high", c.similarity_high)?;
        unit("contradictions.temporal_low", c.temporal_low)?;
        unit("contradictions.temporal_min_confidence", c.temporal_min_confidence)?;
        unit("contradictions.factcheck_min_confidence", c.factcheck_min_confidence)?;
        unit("contradictions.disagreement_min_confidence", c.disagreement_min_confidence)?;
        unit(
            "contradictions.similarity_conflict_min_confidence",
            c.similarity_conflict_min_confidence,
        )?;
        unit(
            "contradictions.unsupported_claim_min_confidence",
            c.unsupported_claim_min_confidence,
        )?;

        let v = &self.verdict;
        let ascending = 0.0 < v.likely_false_from
            && v.likely_false_from < v.uncertain_from
            && v.uncertain_from < v.likely_true_above
            && v.likely_true_above < v.true_above
            && v.true_above < 1.0;
        if !ascending {
            return Err(FusionError::InvalidConfig(format!(
                "verdict boundaries must ascend strictly inside (0, 1): {} < {} < {} < {}",
                v.likely_false_from, v.uncertain_from, v.likely_true_above, v.true_above
            )));
        }
        unit("verdict.high_false_below", v.high_false_below)?;
        unit("verdict.medium_confidence_cap", v.medium_confidence_cap)?;

        Ok(())
    }
}

fn unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FusionError::InvalidConfig(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}

/// Fixed credibility prior per source kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriorTable {
    pub temporal: f64,
    pub text_image_similarity: f64,
    pub news: f64,
    pub factcheck: f64,
    pub wikipedia: f64,
    pub web: f64,
}

impl Default for PriorTable {
    fn default() -> Self {
        Self {
            temporal: SourceKind::Temporal.default_prior(),
            text_image_similarity: SourceKind::TextImageSimilarity.default_prior(),
            news: SourceKind::News.default_prior(),
            factcheck: SourceKind::Factcheck.default_prior(),
            wikipedia: SourceKind::Wikipedia.default_prior(),
            web: SourceKind::Web.default_prior(),
        }
    }
}

impl PriorTable {
    pub fn get(&self, kind: SourceKind) -> f64 {
        match kind {
            SourceKind::Temporal => self.temporal,
            SourceKind::TextImageSimilarity => self.text_image_similarity,
            SourceKind::News => self.news,
            SourceKind::Factcheck => self.factcheck,
            SourceKind::Wikipedia => self.wikipedia,
            SourceKind::Web => self.web,
        }
    }
}

/// Temporal consistency scoring constants
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Delta (days) at which consistency reaches 0
    pub consistency_horizon_days: f64,
    /// Delta strictly above this is a HIGH mismatch
    pub mismatch_high_days: i64,
    /// Delta strictly above this (and up to `mismatch_high_days`) is MEDIUM
    pub mismatch_medium_days: i64,
    pub exif_confidence: f64,
    pub explicit_confidence: f64,
    pub relative_confidence: f64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            consistency_horizon_days: 365.0,
            mismatch_high_days: 365,
            mismatch_medium_days: 30,
            exif_confidence: 0.95,
            explicit_confidence: 0.95,
            relative_confidence: 0.6,
        }
    }
}

/// Contradiction rule triggers and per-rule emission thresholds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContradictionConfig {
    /// Score gap between external sources that counts as disagreement
    pub disagreement_threshold: f64,
    /// Similarity at or above this means the image matches the claim
    pub similarity_high: f64,
    /// Temporal consistency at or below this means the dates do not match
    pub temporal_low: f64,
    pub temporal_min_confidence: f64,
    pub factcheck_min_confidence: f64,
    pub disagreement_min_confidence: f64,
    pub similarity_conflict_min_confidence: f64,
    pub unsupported_claim_min_confidence: f64,
    /// Severity of an unsupported claim; MEDIUM lowers verdict confidence
    pub unsupported_claim_severity: Severity,
}

impl Default for ContradictionConfig {
    fn default() -> Self {
        Self {
            disagreement_threshold: 0.5,
            similarity_high: 0.7,
            temporal_low: 0.3,
            temporal_min_confidence: 0.5,
            factcheck_min_confidence: 0.5,
            disagreement_min_confidence: 0.5,
            similarity_conflict_min_confidence: 0.5,
            unsupported_claim_min_confidence: 0.5,
            unsupported_claim_severity: Severity::Medium,
        }
    }
}

/// Verdict bucket boundaries
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerdictConfig {
    /// Scores strictly above are TRUE
    pub true_above: f64,
    /// Scores strictly above (up to `true_above`) are LIKELY_TRUE
    pub likely_true_above: f64,
    /// Scores from here up to `likely_true_above` inclusive are UNCERTAIN
    pub uncertain_from: f64,
    /// Scores from here up to `uncertain_from` are LIKELY_FALSE; below is FALSE
    pub likely_false_from: f64,
    /// With a HIGH contradiction, scores below this are FALSE
    pub high_false_below: f64,
    /// Upper bound of the confidence band used when a MEDIUM contradiction exists
    pub medium_confidence_cap: f64,
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            true_above: 0.8,
            likely_true_above: 0.6,
            uncertain_from: 0.4,
            likely_false_from: 0.2,
            high_false_below: 0.3,
            medium_confidence_cap: 0.5,
        }
    }
}
