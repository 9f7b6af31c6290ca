//! Viewer error types
//!
//! Defines the errors that can occur while reading, parsing and rendering a CSV
//! file. Malformed cell values are not errors; they degrade to placeholders in
//! the decoder.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur in the viewer pipeline
#[derive(Error, Debug)]
pub enum ViewerError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader could not produce records
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A mount point rejected the rendered output
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization of rendered output failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::Serialization(err.to_string())
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ViewerError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ViewerError::Render(err.to_string())
    }
}

/// Result type alias for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;
