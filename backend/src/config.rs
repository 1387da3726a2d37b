//! Configuration management for the AgriDash platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRIDASH_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Crop-health provider configuration
    pub crop_health: CropHealthConfig,

    /// Generative-language model configuration
    pub gemini: GeminiConfig,
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
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CropHealthConfig {
    /// Crop-health API endpoint
    pub api_endpoint: String,

    /// Crop-health API key
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// Generative Language API endpoint
    pub api_endpoint: String,

    /// API key
    pub api_key: String,

    /// Model identifier, e.g. "gemini-1.5-flash"
    pub model: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRIDASH_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/3.0",
            )?
            .set_default(
                "gemini.api_endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.model", "gemini-1.5-flash")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRIDASH_ prefix)
            .add_source(
                Environment::with_prefix("AGRIDASH")
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
