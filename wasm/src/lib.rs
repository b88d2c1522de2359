//! WebAssembly module for the Courier Pricing Platform
//!
//! Provides client-side computation for:
//! - Delivery fee previews and breakdowns
//! - Demand and time-of-day multipliers
//! - Booking form validation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Calculate the delivery fee for a booking preview
#[wasm_bindgen]
pub fn calculate_delivery_fee(
    service_type: &str,
    distance_km: f64,
    demand: &str,
    order_value: f64,
    hour: u32,
    day_of_week: u32,
    weather: &str,
) -> Result<f64, JsValue> {
    let window = time_window(hour, day_of_week).map_err(|e| JsValue::from_str(&e))?;
    let result = quote(service_type, distance_km, demand, order_value, window, weather)
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(result.final_fee.to_f64().unwrap_or(0.0))
}

/// Itemised fee as JSON, priced in the normal time window
#[wasm_bindgen]
pub fn delivery_fee_breakdown(
    service_type: &str,
    distance_km: f64,
    demand: &str,
    order_value: f64,
    weather: &str,
) -> Result<String, JsValue> {
    breakdown_json(service_type, distance_km, demand, order_value, weather)
        .map_err(|e| JsValue::from_str(&e))
}

/// Time-of-day multiplier for an hour (0-23) and weekday (0 = Sunday)
#[wasm_bindgen]
pub fn temporal_multiplier_at(hour: u32, day_of_week: u32) -> Result<f64, JsValue> {
    let window = time_window(hour, day_of_week).map_err(|e| JsValue::from_str(&e))?;
    Ok(window.multiplier().to_f64().unwrap_or(1.0))
}

/// Demand level name for recent order counts
#[wasm_bindgen]
pub fn demand_level_for(active: u32, recent: u32) -> String {
    DemandLevel::from_order_counts(OrderCounts {
        active: active as usize,
        recent: recent as usize,
    })
    .to_string()
}

/// Validate one booking form field, returning `{is_valid, error}` as JSON
#[wasm_bindgen]
pub fn validate_form_field(field: &str, value: &str) -> String {
    let check = check_field(field, value);
    serde_json::to_string(&check).unwrap_or_default()
}

/// Check a QR payment reference against the provider's format
#[wasm_bindgen]
pub fn is_valid_payment_reference(reference: &str, payment_method: &str) -> bool {
    payment_method
        .parse::<PaymentMethod>()
        .map(|method| validate_qr_reference(reference, method).is_ok())
        .unwrap_or(false)
}

/// Format an amount in pesos, e.g. `₱110.00`
#[wasm_bindgen]
pub fn format_fee(amount: f64) -> String {
    format_currency(Decimal::try_from(amount).unwrap_or(Decimal::ZERO))
}

/// Strip markup characters from free text before submission
#[wasm_bindgen]
pub fn sanitize_text(input: &str) -> String {
    sanitize_input(input)
}

fn to_decimal(field: &'static str, value: f64) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err(PricingError::InvalidInput {
            field,
            reason: "must be a finite number".to_string(),
        }
        .to_string());
    }
    Decimal::try_from(value).map_err(|e| format!("Invalid {}: {}", field, e))
}

fn time_window(hour: u32, day_of_week: u32) -> Result<TimeWindow, String> {
    let time = TimeContext::try_new(hour, day_of_week).map_err(|e| e.to_string())?;
    Ok(TimeWindow::classify(&time))
}

fn quote(
    service_type: &str,
    distance_km: f64,
    demand: &str,
    order_value: f64,
    window: TimeWindow,
    weather: &str,
) -> Result<PricingResult, String> {
    let demand: DemandLevel = demand.parse()?;
    let weather: WeatherCondition = weather.parse()?;
    let request = PricingRequest::new(
        ServiceType::from_label(service_type),
        to_decimal("distance_km", distance_km)?,
    )
    .with_demand(demand)
    .with_order_value(to_decimal("order_value", order_value)?);

    compute_fee_in_window(&request, window, weather.multiplier()).map_err(|e| e.to_string())
}

fn breakdown_json(
    service_type: &str,
    distance_km: f64,
    demand: &str,
    order_value: f64,
    weather: &str,
) -> Result<String, String> {
    let result = quote(
        service_type,
        distance_km,
        demand,
        order_value,
        TimeWindow::Normal,
        weather,
    )?;
    let breakdown = build_breakdown(
        service_type,
        to_decimal("distance_km", distance_km)?,
        &result,
    );
    serde_json::to_string(&breakdown).map_err(|e| e.to_string())
}

fn check_field(field: &str, value: &str) -> FieldCheck {
    match serde_json::from_value::<FieldKind>(serde_json::Value::String(field.to_string())) {
        Ok(kind) => FieldCheck::from(kind.validate(value)),
        Err(_) => FieldCheck::invalid(format!("Unknown field: {}", field)),
    }
}
