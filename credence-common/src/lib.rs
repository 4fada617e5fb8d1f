//! # Credence Common Library
//!
//! Shared code for the credence crates:
//! - Error types
//! - Configuration file resolution and loading
//! - Logging initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
