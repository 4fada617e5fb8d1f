// Fusion Engine
//
// final_score = sum(weight_i * score_i) over present sources only.
//
// Weights come from the AttentionWeightCalculator and are recorded verbatim:
// the weights shown to the user are exactly the weights applied. Zero present
// sources is a hard failure (NoEvidence), never a neutral 0.5.

use crate::attention::{AttentionWeightCalculator, AttentionWeights};
use crate::error::{FusionError, Result};
use crate::evidence::{check_unit_interval, EvidenceSet, SourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ROUNDING_TOLERANCE: f64 = 1e-9;

/// Output of the fusion stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedScore {
    /// Weighted credibility score in [0, 1]
    pub final_score: f64,
    /// Weight applied per present source (sums to 1)
    pub weights_used: AttentionWeights,
    /// weight * score per present source (sums to final_score)
    pub contributions: BTreeMap<SourceKind, f64>,
    /// Source with the largest weight; ties go to the earlier kind
    pub dominant_source: SourceKind,
}

#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    attention: AttentionWeightCalculator,
}

impl FusionEngine {
    pub fn new(attention: AttentionWeightCalculator) -> Self {
        Self { attention }
    }

    /// Fuse the present evidence into one score
    ///
    /// # Errors
    /// `NoEvidence` when no source is present, `MalformedEvidence` if a
    /// reading is out of range.
    pub fn fuse(&self, evidence: &EvidenceSet) -> Result<FusedScore> {
        let weights = self.attention.compute(evidence.present_kinds());
        if weights.is_empty() {
            tracing::warn!("Fusion refused: no evidence source present");
            return Err(FusionError::NoEvidence);
        }

        let mut contributions = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut dominant: Option<(SourceKind, f64)> = None;

        for (kind, weight) in &weights {
            let Some(reading) = evidence.reading(*kind) else {
                continue;
            };
            check_unit_interval(*kind, "score", reading.score())?;
            check_unit_interval(*kind, "confidence", reading.confidence())?;

            let contribution = weight * reading.score();
            contributions.insert(*kind, contribution);
            weighted_sum += contribution;

            if dominant.map_or(true, |(_, best)| *weight > best) {
                dominant = Some((*kind, *weight));
            }
        }

        let Some((dominant_source, _)) = dominant else {
            return Err(FusionError::NoEvidence);
        };

        debug_assert!(
            (0.0..=1.0 + ROUNDING_TOLERANCE).contains(&weighted_sum),
            "weighted sum {} escaped [0, 1]",
            weighted_sum
        );
        // Rounding can push a convex combination a few ulps past 1.0
        let final_score = weighted_sum.min(1.0);

        tracing::debug!(
            "Fused {} sources: final_score={:.4}, dominant={}",
            weights.len(),
            final_score,
            dominant_source
        );

        Ok(FusedScore {
            final_score,
            weights_used: weights,
            contributions,
            dominant_source,
        })
    }
}
