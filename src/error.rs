//! Structured error types for gridcore.
//!
//! The pipeline itself never throws: accessor failures degrade to
//! non-matching/maximal values and range math is clamped. Errors surface only
//! at the configuration and persistence seams.

/// All errors that can occur in grid configuration and persistence.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid grid configuration (e.g., pagination and virtualization both
    /// enabled, or a zero page size).
    #[error("Configuration: {0}")]
    Config(String),

    /// The injected key-value storage rejected a write.
    #[error("Storage: {0}")]
    Storage(String),

    /// The caller reported that row loading failed; carried into the render
    /// state, no rows are processed.
    #[error("Data error: {0}")]
    Data(String),

    /// JSON encoding of persisted state failed.
    #[error("JSON serialization: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
