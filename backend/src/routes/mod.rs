//! Route definitions for the Courier Pricing Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/pricing", pricing_routes())
        .nest("/validation", validation_routes())
}

/// Fee quoting routes
fn pricing_routes() -> Router<AppState> {
    Router::new()
        .route("/quote", post(handlers::quote))
        .route("/breakdown", post(handlers::breakdown))
        .route("/demand", get(handlers::current_demand))
        .route("/rates", get(handlers::rates))
}

/// Form and payment validation routes
fn validation_routes() -> Router<AppState> {
    Router::new()
        .route("/fields", post(handlers::validate_fields))
        .route("/payment-reference", post(handlers::validate_payment_reference))
}
