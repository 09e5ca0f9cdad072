//! Configuration management for Reviewduck
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REVIEWDUCK_*)
//! 3. Config file (~/.config/reviewduck/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Database-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: 5,
        }
    }
}

/// Share code generation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CodeSettings {
    /// How many fresh codes to try before giving up on a collision streak
    pub max_attempts: u32,
}

impl Default for CodeSettings {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseSettings,

    /// Code generation configuration
    pub code: CodeSettings,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/reviewduck/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reviewduck").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REVIEWDUCK_DATABASE_PATH: Path to the SQLite database
    /// - REVIEWDUCK_MAX_CONNECTIONS: Connection pool size
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = lookup("REVIEWDUCK_DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("REVIEWDUCK_MAX_CONNECTIONS") {
            self.database.max_connections = raw.parse().map_err(|_| {
                Error::Config(format!("REVIEWDUCK_MAX_CONNECTIONS is not a number: {}", raw))
            })?;
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, database_path: Option<PathBuf>) -> Self {
        if let Some(path) = database_path {
            self.database.path = path;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(database_path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(database_path))
    }
}

/// Returns `~/.cache/reviewduck/reviewduck.db`, or a relative path when no
/// cache directory is known.
fn default_database_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reviewduck")
        .join("reviewduck.db")
}
