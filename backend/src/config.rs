//! Configuration management for the Procurement Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PMD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::mappings::ReferenceTables;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// PO automation webhook configuration
    pub automation: AutomationConfig,

    /// Geographic reference API configuration
    pub regions: RegionsConfig,

    /// Branch/department/request-type reference tables; the compiled-in
    /// tables apply unless a deployment overrides them
    #[serde(default)]
    pub tables: ReferenceTables,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AutomationConfig {
    /// Base URL of the workflow-automation service
    pub base_url: String,

    /// Webhook id the PO-creation flow listens on
    pub webhook_id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegionsConfig {
    /// Country listing endpoint
    pub countries_url: String,

    /// Base URL of the province/city reference API
    pub wilayah_base_url: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PMD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("automation.base_url", "http://localhost:5678")?
            .set_default("automation.webhook_id", "material-request-po")?
            .set_default(
                "regions.countries_url",
                "https://restcountries.com/v3.1/all?fields=cca2,name",
            )?
            .set_default("regions.wilayah_base_url", "https://wilayah.id/api")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PMD_ prefix)
            .add_source(
                Environment::with_prefix("PMD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
