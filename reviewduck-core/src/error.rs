//! Error types for Reviewduck

use thiserror::Error;

/// Result type alias for Reviewduck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Reviewduck operations
#[derive(Error, Debug)]
pub enum Error {
    /// A domain invariant was violated by the input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A lookup by code or id found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Whether this error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Whether this error is a rejected input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
