//! Error types for sitecredits
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for sitecredits operations
#[derive(Error, Debug)]
pub enum CreditsError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog JSON has the wrong shape
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A catalog entry lacks a required string field
    #[error("Catalog entry {index} is missing string field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// An extraction pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(String),
}

impl CreditsError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<regex_lite::Error> for CreditsError {
    fn from(err: regex_lite::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}

/// Result type alias for sitecredits operations
pub type Result<T> = std::result::Result<T, CreditsError>;
