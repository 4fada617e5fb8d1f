//! Error types for the fusion core
//!
//! Only two conditions are errors: evidence that is numerically invalid and a
//! request with no evidence at all. Disagreement, mismatch and low scores are
//! ordinary outcomes and surface as contradictions or verdicts instead.

use crate::evidence::SourceKind;
use thiserror::Error;

/// Result type for fusion operations
pub type Result<T> = std::result::Result<T, FusionError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FusionError {
    /// A present evidence field is out of range or otherwise invalid.
    /// Rejected, never clamped.
    #[error("Malformed evidence from {source_kind}: {reason}")]
    MalformedEvidence {
        source_kind: SourceKind,
        reason: String,
    },

    /// Zero sources present: verification not possible
    #[error("No evidence present: verification not possible")]
    NoEvidence,

    /// Fusion configuration failed validation
    #[error("Invalid fusion configuration: {0}")]
    InvalidConfig(String),
}

impl FusionError {
    pub(crate) fn out_of_range(source_kind: SourceKind, field: &str, value: f64) -> Self {
        FusionError::MalformedEvidence {
            source_kind,
            reason: format!("{} = {} is outside [0, 1]", field, value),
        }
    }
}
