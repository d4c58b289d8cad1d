//! # Store Configuration
//!
//! Loads the settings needed to reach the PostgreSQL slot store.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: Connection pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")

use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for the PostgreSQL-backed slot store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// Log level for the application
    pub log_level: Level,
}

impl StoreConfig {
    /// Creates a new StoreConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The DB_MAX_CONNECTIONS value cannot be parsed as a u32
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source, `from_env` uses the
    /// process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid DB_MAX_CONNECTIONS value")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_level = lookup("LOG_LEVEL")
            .map(|value| parse_log_level(&value))
            .unwrap_or(Level::INFO);

        Ok(Self {
            database_url,
            max_connections,
            log_level,
        })
    }

    /// Configuration with default pool settings for the given database
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            log_level: Level::INFO,
        }
    }
}

/// Unknown levels fall back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
