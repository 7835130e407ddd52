//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Model lookup cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Display configuration used when formatting responses.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a connection before giving up.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whether sqlx should log every statement.
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    8
}

/// Model lookup cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached model lists, in seconds.
    #[serde(default = "default_model_ttl")]
    pub model_ttl_secs: u64,
    /// Maximum number of cached date ranges.
    #[serde(default = "default_model_capacity")]
    pub model_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            model_ttl_secs: default_model_ttl(),
            model_capacity: default_model_capacity(),
        }
    }
}

fn default_model_ttl() -> u64 {
    60
}

fn default_model_capacity() -> u64 {
    256
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Symbol placed before monetary amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Label of the synthetic "every model" option.
    #[serde(default = "default_all_models_label")]
    pub all_models_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            all_models_label: default_all_models_label(),
        }
    }
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_all_models_label() -> String {
    "All".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        Self::load_from("config")
    }

    /// Loads configuration using `dir` as the config file directory.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `{dir}/default.toml`, `{dir}/{RUN_MODE}.toml`, `SALESBOARD__*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`](crate::AppError::Configuration)
    /// if a source cannot be read or a required key is missing.
    pub fn load_from(dir: &str) -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SALESBOARD").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
