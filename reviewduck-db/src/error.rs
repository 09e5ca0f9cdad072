//! Error types for database operations

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum Error {
    /// SQLx database error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation or lookup failure from the domain
    #[error(transparent)]
    Domain(#[from] reviewduck_core::Error),

    /// Every generated share code collided with an existing one
    #[error("Could not allocate a unique review form code after {0} attempts")]
    CodeExhausted(u32),
}

impl Error {
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Error::Domain(reviewduck_core::Error::NotFound(message.into()))
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Domain(reviewduck_core::Error::Validation(message.into()))
    }

    /// Whether a lookup by code or id came up empty
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Domain(e) if e.is_not_found())
    }

    /// Whether the input broke a domain rule
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Domain(e) if e.is_validation())
    }

    /// Whether this is a unique constraint violation reported by SQLite
    pub(crate) fn is_unique_violation(&self) -> bool {
        matches!(self, Error::Sqlx(sqlx::Error::Database(e)) if e.is_unique_violation())
    }
}

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, Error>;
