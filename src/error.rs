//! Error types for the posture analysis library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// The external landmark provider could not be invoked
    #[error("Landmark provider error: {0}")]
    Provider(String),

    /// A landmark required by the selected evaluator was missing
    #[error("Missing required keypoint: {0}")]
    IncompleteKeypoints(crate::landmarks::BodyPart),

    /// A geometric computation hit a degenerate input (zero-length ray,
    /// zero denominator)
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
