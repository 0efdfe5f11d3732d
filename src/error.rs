//! Error types for fileshare.

use thiserror::Error;

/// Common error type for fileshare.
#[derive(Error, Debug)]
pub enum ShareError {
    /// The request did not carry a usable credential for the required capability.
    ///
    /// Missing, unknown, wrong-capability and disabled tokens all collapse into
    /// this single variant.
    #[error("unauthorized")]
    Unauthorized,

    /// A user-supplied filename failed sanitization or certification.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Resource not found. Disabled short links are reported this way too.
    #[error("{0} not found")]
    NotFound(String),

    /// Short-code allocation ran out of attempts.
    #[error("short code allocation exhausted after {attempts} attempts")]
    Exhausted {
        /// Number of codes drawn before giving up.
        attempts: u32,
    },

    /// A unique value already exists in the store.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store failed.
    ///
    /// Errors from sqlx are automatically converted.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for ShareError {
    fn from(e: sqlx::Error) -> Self {
        ShareError::StoreUnavailable(e.to_string())
    }
}

/// Result type alias for fileshare operations.
pub type Result<T> = std::result::Result<T, ShareError>;
