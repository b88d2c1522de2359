//! HTTP handlers for fee quotes and breakdowns

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{DemandLevel, PricingBreakdown, PricingResult, ServiceRate};
use validator::Validate;

use crate::error::AppResult;
use crate::services::QuoteInput;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 100))]
    pub service_type: String,
    pub distance_km: Decimal,
    /// Estimated from recent orders when omitted
    pub demand: Option<DemandLevel>,
    #[serde(default)]
    pub order_value: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BreakdownRequest {
    #[validate(length(min = 1, max = 100))]
    pub service_type: String,
    pub distance_km: Decimal,
    #[serde(default)]
    pub order_value: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DemandResponse {
    pub demand_level: DemandLevel,
    pub multiplier: Decimal,
}

/// Quote a delivery fee
pub async fn quote(
    State(state): State<AppState>,
    Json(body): Json<QuoteRequest>,
) -> AppResult<Json<PricingResult>> {
    body.validate()?;
    let result = state
        .pricing
        .quote(QuoteInput {
            service_type: body.service_type,
            distance_km: body.distance_km,
            demand: body.demand,
            order_value: body.order_value,
        })
        .await?;
    Ok(Json(result))
}

/// Itemised fee for checkout display
pub async fn breakdown(
    State(state): State<AppState>,
    Json(body): Json<BreakdownRequest>,
) -> AppResult<Json<PricingBreakdown>> {
    body.validate()?;
    let breakdown = state
        .pricing
        .breakdown(&body.service_type, body.distance_km, body.order_value)
        .await?;
    Ok(Json(breakdown))
}

/// Current demand level
pub async fn current_demand(State(state): State<AppState>) -> Json<DemandResponse> {
    let level = state.pricing.current_demand().await;
    Json(DemandResponse {
        demand_level: level,
        multiplier: level.multiplier(),
    })
}

/// Rate table for every service type
pub async fn rates(State(state): State<AppState>) -> Json<Vec<ServiceRate>> {
    Json(state.pricing.rates())
}
