//! Error types for tunnelmap

use std::io;

/// Result type for tunnelmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in tunnelmap operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reference system identifier is malformed or unknown to PROJ
    #[error("Invalid reference system: {0}")]
    InvalidReferenceSystem(String),

    /// Coordinate is non-finite or outside the projection's domain
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Alignment has fewer than two vertices
    #[error("Degenerate alignment: expected at least 2 vertices, got {0}")]
    DegenerateAlignment(usize),

    /// Projection error not caused by the input
    #[error("Projection error: {0}")]
    Projection(String),

    /// Malformed request or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV input that does not parse; write failures are reported as `Io`
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true when the error was caused by the caller's input
    pub fn is_validation(&self) -> bool {
        match self {
            Error::InvalidReferenceSystem(_)
            | Error::InvalidCoordinate(_)
            | Error::DegenerateAlignment(_)
            | Error::InvalidInput(_)
            | Error::Json(_) => true,
            Error::Csv(e) => !matches!(e.kind(), csv::ErrorKind::Io(_)),
            Error::Projection(_) | Error::Io(_) => false,
        }
    }
}
