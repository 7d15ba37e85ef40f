//! Error types for the rating crate
//!
//! The rating engine itself never fails on finite input. Errors only arise at
//! the edges: parsing history exports and loading configuration.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for the parsing and configuration layers
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Malformed history row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Missing history column: {column}")]
    MissingColumn { column: String },

    #[error("Empty rating history: no header row")]
    EmptyHistory,

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
