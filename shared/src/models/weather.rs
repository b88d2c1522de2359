//! Weather conditions and their delivery surcharge

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coarse weather condition over the service area
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Clear,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Stormy,
    ];

    pub fn multiplier(&self) -> Decimal {
        match self {
            WeatherCondition::Clear => Decimal::ONE,
            WeatherCondition::Cloudy => Decimal::new(105, 2),
            WeatherCondition::Rainy => Decimal::new(115, 2),
            WeatherCondition::Stormy => Decimal::new(13, 1),
        }
    }

    /// Map an OpenWeatherMap condition group ("Rain", "Clouds", ...) to a condition
    pub fn from_owm_group(group: &str) -> Self {
        match group {
            "Thunderstorm" | "Squall" | "Tornado" => WeatherCondition::Stormy,
            "Rain" | "Drizzle" => WeatherCondition::Rainy,
            "Clear" => WeatherCondition::Clear,
            _ => WeatherCondition::Cloudy,
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherCondition::Clear => write!(f, "clear"),
            WeatherCondition::Cloudy => write!(f, "cloudy"),
            WeatherCondition::Rainy => write!(f, "rainy"),
            WeatherCondition::Stormy => write!(f, "stormy"),
        }
    }
}

impl std::str::FromStr for WeatherCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherCondition::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown weather condition: {}", s))
    }
}
