//! Database layer for Reviewduck
//!
//! Stores review forms, questions and reviews in SQLite and exposes the
//! services that run each operation inside a single transaction.

pub mod error;
pub mod models;
pub mod repos;
pub mod services;

use reviewduck_core::config::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::Path;

pub use error::{Error, Result};
pub use repos::{ReviewFormRepository, ReviewRepository};
pub use services::{FormReviews, ReviewFormService, ReviewService};

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database described by `settings` and
    /// bring its schema up to date
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        // Create parent directory if needed
        if let Some(parent) = settings.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&settings.path)
            .create_if_missing(true)
            .foreign_keys(true)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!(path = %settings.path.display(), "Database ready");
        Ok(Self { pool })
    }

    /// Open a database file with default pool settings
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let settings = DatabaseSettings {
            path: path.as_ref().to_path_buf(),
            ..DatabaseSettings::default()
        };
        Self::connect(&settings).await
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}
