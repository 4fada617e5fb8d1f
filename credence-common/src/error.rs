//! Common error types for credence

use thiserror::Error;

/// Common result type for credence operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the credence crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}
