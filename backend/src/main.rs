//! Courier Pricing Platform - Backend Server

use anyhow::Context;
use courier_pricing::{
    clock::SystemClock,
    config::Config,
    create_app,
    services::weather_source_from_config,
    store::{DataStore, InMemoryStore, PgDataStore},
    AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier_pricing=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Courier Pricing Server");
    tracing::info!("Environment: {}", config.environment);

    let store: Arc<dyn DataStore> = match &config.database.url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(url)
                .await?;
            tracing::info!("Database connection established");
            Arc::new(PgDataStore::new(db_pool))
        }
        None => {
            tracing::warn!("No database URL configured, using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    let weather =
        weather_source_from_config(&config.weather).context("Invalid weather configuration")?;
    tracing::info!("Weather provider: {:?}", config.weather.provider);

    let clock = Arc::new(SystemClock::with_offset_hours(config.pricing.utc_offset_hours));
    let host = config.server.host.clone();
    let port = config.server.port;

    let state = AppState::new(config, store, clock, weather);
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
