//! Weather API client for the service area's current conditions
//!
//! Integrates with the OpenWeatherMap current-weather endpoint

use reqwest::Client;
use serde::Deserialize;
use shared::WeatherCondition;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
    description: String,
}

impl WeatherClient {
    /// Create a new WeatherClient against `base_url`
    pub fn new(api_key: String, base_url: String) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::Configuration(format!("Weather HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current condition at GPS coordinates
    pub async fn current_condition(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherCondition> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::WeatherService(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherService(format!("{} - {}", status, body)));
        }

        let data: OWMCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherService(format!("unreadable response: {}", e)))?;

        condition_from_response(&data)
    }
}

fn condition_from_response(data: &OWMCurrentResponse) -> AppResult<WeatherCondition> {
    let weather = data
        .weather
        .first()
        .ok_or_else(|| AppError::WeatherService("response has no conditions".to_string()))?;

    tracing::debug!(
        location = data.name.as_deref().unwrap_or("unknown"),
        group = %weather.main,
        description = %weather.description,
        "Current weather"
    );

    Ok(WeatherCondition::from_owm_group(&weather.main))
}
