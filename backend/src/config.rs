//! Configuration management for the Courier Pricing Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with COURIER_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::WeatherCondition;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Pricing engine configuration
    pub pricing: PricingConfig,

    /// Weather source configuration
    pub weather: WeatherConfig,
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
    /// PostgreSQL connection URL; orders are kept in memory when absent
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Offset of the service area's local time from UTC
    pub utc_offset_hours: i32,

    /// Upper bound on the demand query before falling back to normal demand
    pub demand_query_timeout_ms: u64,

    /// Price breakdowns at the live clock; `false` pins them to the normal window
    pub use_live_clock_for_breakdown: bool,
}

/// Where weather conditions come from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherProvider {
    Simulated,
    Fixed,
    OpenWeatherMap,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    pub provider: WeatherProvider,

    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: Option<String>,

    /// Service-area coordinates queried for current conditions
    pub latitude: f64,
    pub longitude: f64,

    /// Condition used by the fixed provider
    pub fixed_condition: WeatherCondition,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("COURIER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("pricing.utc_offset_hours", 8)?
            .set_default("pricing.demand_query_timeout_ms", 2000)?
            .set_default("pricing.use_live_clock_for_breakdown", true)?
            .set_default("weather.provider", "simulated")?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            // Calapan City, Oriental Mindoro
            .set_default("weather.latitude", 13.4119)?
            .set_default("weather.longitude", 121.1803)?
            .set_default("weather.fixed_condition", "clear")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (COURIER_ prefix)
            .add_source(
                Environment::with_prefix("COURIER")
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

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: 8,
            demand_query_timeout_ms: 2000,
            use_live_clock_for_breakdown: true,
        }
    }
}
