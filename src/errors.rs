//! Shared error types for the extraction pipeline.
//!
//! Only document-level and I/O-level failures surface as [`Error`]. Records
//! that fail to parse, filter or classify are counted in the per-stage stats
//! and never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for metmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Source document does not exist
    #[error("Source document not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// Source document yielded zero parseable activity lines
    #[error("No activities extracted from {}", path.display())]
    NoActivities { path: PathBuf },

    /// Page text could not be extracted from the source document
    #[error("Failed to extract text from {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    /// Validate-only run against an output file that was never written
    #[error("Output file not found: {}", path.display())]
    OutputMissing { path: PathBuf },

    /// Settings or rule configuration is unusable
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Output location could not be written
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error with path context
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error with path context
    pub fn extraction(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }
}
