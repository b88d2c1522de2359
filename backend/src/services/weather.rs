//! Weather sources and the weather surcharge

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use shared::WeatherCondition;
use std::sync::Arc;

use crate::config::{WeatherConfig, WeatherProvider};
use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;

/// Anything that can report the current weather over the service area
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self) -> WeatherCondition;
}

/// Uniformly random condition, used until a live feed is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWeather;

#[async_trait]
impl WeatherSource for RandomWeather {
    async fn current(&self) -> WeatherCondition {
        WeatherCondition::ALL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(WeatherCondition::Clear)
    }
}

/// Always reports the same condition
#[derive(Debug, Clone, Copy)]
pub struct FixedWeather(pub WeatherCondition);

#[async_trait]
impl WeatherSource for FixedWeather {
    async fn current(&self) -> WeatherCondition {
        self.0
    }
}

/// Live conditions from OpenWeatherMap, falling back to clear skies
#[derive(Clone)]
pub struct OpenWeatherSource {
    client: WeatherClient,
    latitude: f64,
    longitude: f64,
}

impl OpenWeatherSource {
    pub fn new(client: WeatherClient, latitude: f64, longitude: f64) -> Self {
        Self {
            client,
            latitude,
            longitude,
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn current(&self) -> WeatherCondition {
        match self
            .client
            .current_condition(self.latitude, self.longitude)
            .await
        {
            Ok(condition) => condition,
            Err(e) => {
                tracing::warn!("Weather feed failed, assuming clear weather: {}", e);
                WeatherCondition::Clear
            }
        }
    }
}

/// Build the weather source named by configuration
pub fn weather_source_from_config(config: &WeatherConfig) -> AppResult<Arc<dyn WeatherSource>> {
    let source: Arc<dyn WeatherSource> = match config.provider {
        WeatherProvider::Simulated => Arc::new(RandomWeather),
        WeatherProvider::Fixed => Arc::new(FixedWeather(config.fixed_condition)),
        WeatherProvider::OpenWeatherMap => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                AppError::Configuration("weather.api_key is required for openweathermap".into())
            })?;
            let client = WeatherClient::new(api_key, config.api_endpoint.clone())?;
            Arc::new(OpenWeatherSource::new(
                client,
                config.latitude,
                config.longitude,
            ))
        }
    };
    Ok(source)
}

/// Turns the current weather into a fee multiplier
#[derive(Clone)]
pub struct WeatherAdjustor {
    source: Arc<dyn WeatherSource>,
}

impl WeatherAdjustor {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    pub async fn condition(&self) -> WeatherCondition {
        self.source.current().await
    }

    pub async fn sample(&self) -> Decimal {
        self.condition().await.multiplier()
    }
}
