//! Crate error type
//!
//! Only the configuration boundary is fallible. The physics core works on
//! trusted inputs and never returns errors.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Settings file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`crate::Settings`].
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
