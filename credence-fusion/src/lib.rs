//! # Credence Fusion
//!
//! Deterministic fusion core for text/image claim verification:
//! - Evidence normalisation and temporal consistency scoring
//! - Prior-based attention weights over the sources actually present
//! - Weighted score fusion
//! - Rule-based contradiction detection
//! - Verdict classification
//!
//! No I/O, no learned model, no shared mutable state. [`Verifier`] ties the
//! stages together.

pub mod attention;
pub mod config;
pub mod contradiction;
pub mod error;
pub mod evidence;
pub mod fusion;
pub mod input;
pub mod normalizer;
pub mod temporal;
pub mod verdict;
pub mod verifier;

pub use config::{AppConfig, FusionConfig};
pub use contradiction::{ContradictionDetector, ContradictionKind, ContradictionRecord, Severity};
pub use error::{FusionError, Result};
pub use evidence::{EvidenceRecord, EvidenceSet, SourceKind};
pub use input::VerificationInput;
pub use verdict::{Verdict, VerdictBasis};
pub use verifier::{FusionResult, Verifier};
