//! Courier Pricing Platform - delivery fee quoting service
//!
//! Prices deliveries from the service rate table, time of day, live order
//! demand and weather, and validates booking form input.

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod clock;
pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use clock::Clock;
use services::{
    DemandEstimator, PaymentReferenceService, PricingService, WeatherAdjustor, WeatherSource,
};
use store::DataStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pricing: PricingService,
    pub payments: PaymentReferenceService,
    pub store: Arc<dyn DataStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire services over the given collaborators
    pub fn new(
        config: Config,
        store: Arc<dyn DataStore>,
        clock: Arc<dyn Clock>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        let demand = DemandEstimator::new(
            store.clone(),
            clock.clone(),
            Duration::from_millis(config.pricing.demand_query_timeout_ms),
        );
        let pricing = PricingService::new(
            demand,
            WeatherAdjustor::new(weather),
            clock,
            config.pricing.use_live_clock_for_breakdown,
        );
        let payments = PaymentReferenceService::new(store.clone());

        Self {
            pricing,
            payments,
            store,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Courier Pricing Platform API v1.0"
}
