use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL. Without one the API runs on the in-memory store.
    pub database_url: Option<String>,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Largest accepted request body, uploads included.
    pub max_upload_bytes: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            db_max_connections: 20,
            db_min_connections: 5,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 10 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", "u16", defaults.port)?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            db_max_connections: parsed("DB_MAX_CONNECTIONS", "u32", defaults.db_max_connections)?,
            db_min_connections: parsed("DB_MIN_CONNECTIONS", "u32", defaults.db_min_connections)?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES", "usize", defaults.max_upload_bytes)?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(name: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
