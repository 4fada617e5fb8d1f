// Attention Weight Calculator
//
// Deterministic "attention": each present source gets its fixed prior,
// renormalized over the present sources only.
//
//   weight_i = prior_i / sum(prior_j for j present)
//
// Absent sources never appear in the output, so the weights always form a
// valid simplex regardless of how many sources are missing.

use crate::config::PriorTable;
use crate::evidence::SourceKind;
use std::collections::{BTreeMap, BTreeSet};

/// Weight per present source, in canonical order
pub type AttentionWeights = BTreeMap<SourceKind, f64>;

#[derive(Debug, Clone, Default)]
pub struct AttentionWeightCalculator {
    priors: PriorTable,
}

impl AttentionWeightCalculator {
    pub fn new(priors: PriorTable) -> Self {
        Self { priors }
    }

    /// Compute weights for the given present sources
    ///
    /// Duplicates are ignored. Returns an empty map when nothing is present;
    /// the fusion stage turns that into `NoEvidence`.
    pub fn compute(&self, present: impl IntoIterator<Item = SourceKind>) -> AttentionWeights {
        let present: BTreeSet<SourceKind> = present.into_iter().collect();
        let total: f64 = present.iter().map(|kind| self.priors.get(*kind)).sum();

        if present.is_empty() || total <= 0.0 {
            return AttentionWeights::new();
        }

        let weights: AttentionWeights = present
            .iter()
            .map(|kind| (*kind, self.priors.get(*kind) / total))
            .collect();

        tracing::debug!("Attention weights over {} sources: {:?}", weights.len(), weights);
        weights
    }
}
