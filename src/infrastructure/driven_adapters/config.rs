//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Default limit on request bodies read during model binding (2 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Host advertised in the API documentation
#[derive(Debug, Clone, Deserialize)]
pub struct HostMetadata {
    pub description: String,
    pub url: String,
}

/// API metadata shown by the documentation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    pub title: String,
    pub version: String,
    pub docs_path: String,
    pub host: HostMetadata,
}

/// Model binding configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BindingConfig {
    pub body_limit: usize,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub binding: BindingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config/default` is missing or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__METADATA__TITLE)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Build configuration from a TOML document
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is not valid TOML or misses a field.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
