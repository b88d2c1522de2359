//! Business logic services for the Courier Pricing Platform

pub mod demand;
pub mod payment;
pub mod pricing;
pub mod weather;

pub use demand::DemandEstimator;
pub use payment::PaymentReferenceService;
pub use pricing::{PricingService, QuoteInput};
pub use weather::{
    weather_source_from_config, FixedWeather, OpenWeatherSource, RandomWeather, WeatherAdjustor,
    WeatherSource,
};
