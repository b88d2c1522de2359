//! Delivery fee calculation and breakdown

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::demand::DemandLevel;
use super::service::{RateTable, ServiceType};
use super::time::{TimeContext, TimeWindow};
use crate::types::{format_currency, round_currency};

/// Charge per kilometre before the service multiplier
pub const DISTANCE_RATE_PER_KM: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Lowest fee ever quoted
pub const MIN_FEE: Decimal = Decimal::from_parts(35, 0, 0, false, 0);

/// Highest fee ever quoted
pub const MAX_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Errors raised for inputs that cannot produce a meaningful fee
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl PricingError {
    fn negative(field: &'static str) -> Self {
        PricingError::InvalidInput {
            field,
            reason: "must not be negative".to_string(),
        }
    }
}

/// Inputs to a single fee quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRequest {
    /// `None` when the caller named a service outside the catalog
    pub service_type: Option<ServiceType>,
    pub distance_km: Decimal,
    #[serde(default)]
    pub demand: DemandLevel,
    #[serde(default)]
    pub order_value: Decimal,
}

impl PricingRequest {
    pub fn new(service_type: Option<ServiceType>, distance_km: Decimal) -> Self {
        Self {
            service_type,
            distance_km,
            demand: DemandLevel::Normal,
            order_value: Decimal::ZERO,
        }
    }

    pub fn with_demand(mut self, demand: DemandLevel) -> Self {
        self.demand = demand;
        self
    }

    pub fn with_order_value(mut self, order_value: Decimal) -> Self {
        self.order_value = order_value;
        self
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.distance_km < Decimal::ZERO {
            return Err(PricingError::negative("distance_km"));
        }
        if self.order_value < Decimal::ZERO {
            return Err(PricingError::negative("order_value"));
        }
        Ok(())
    }
}

/// Every factor that went into a fee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeComponents {
    pub base_rate: Decimal,
    pub service_multiplier: Decimal,
    pub distance_charge: Decimal,
    pub base_fee: Decimal,
    pub time_window: TimeWindow,
    pub temporal_multiplier: Decimal,
    pub demand_level: DemandLevel,
    pub demand_multiplier: Decimal,
    pub order_value_multiplier: Decimal,
    pub weather_multiplier: Decimal,
    /// Fee before clamping and rounding
    pub adjusted_fee: Decimal,
}

/// Quoted delivery fee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingResult {
    /// Clamped to [`MIN_FEE`, `MAX_FEE`] and rounded to 2 decimal places
    pub final_fee: Decimal,
    pub components: FeeComponents,
}

/// Surcharge for high-value orders (strictly above 2000 and 5000)
pub fn order_value_multiplier(order_value: Decimal) -> Decimal {
    if order_value > Decimal::from(5000) {
        Decimal::new(110, 2)
    } else if order_value > Decimal::from(2000) {
        Decimal::new(105, 2)
    } else {
        Decimal::ONE
    }
}

/// Clamp to the quotable range, then round to cents
pub fn finalize_fee(adjusted_fee: Decimal) -> Decimal {
    round_currency(adjusted_fee.clamp(MIN_FEE, MAX_FEE))
}

/// Compute a fee using the temporal multiplier for `time`
pub fn compute_fee(
    request: &PricingRequest,
    time: &TimeContext,
    weather_multiplier: Decimal,
) -> Result<PricingResult, PricingError> {
    compute_fee_in_window(request, TimeWindow::classify(time), weather_multiplier)
}

/// Compute a fee for an already-resolved time window.
///
/// Overflowing intermediate products saturate, so the result still lands on
/// [`MAX_FEE`].
pub fn compute_fee_in_window(
    request: &PricingRequest,
    window: TimeWindow,
    weather_multiplier: Decimal,
) -> Result<PricingResult, PricingError> {
    request.validate()?;
    if weather_multiplier <= Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: "weather_multiplier",
            reason: "must be positive".to_string(),
        });
    }

    let rate = RateTable::entry(request.service_type);
    let temporal_multiplier = window.multiplier();
    let demand_multiplier = request.demand.multiplier();
    let value_multiplier = order_value_multiplier(request.order_value);

    let distance_charge = DISTANCE_RATE_PER_KM
        .checked_mul(request.distance_km)
        .unwrap_or(Decimal::MAX);
    let base_fee = distance_charge
        .checked_add(rate.base_rate)
        .and_then(|fee| fee.checked_mul(rate.service_multiplier))
        .unwrap_or(Decimal::MAX);
    let adjusted_fee = [
        temporal_multiplier,
        demand_multiplier,
        value_multiplier,
        weather_multiplier,
    ]
    .iter()
    .try_fold(base_fee, |fee, m| fee.checked_mul(*m))
    .unwrap_or(Decimal::MAX);

    Ok(PricingResult {
        final_fee: finalize_fee(adjusted_fee),
        components: FeeComponents {
            base_rate: rate.base_rate,
            service_multiplier: rate.service_multiplier,
            distance_charge,
            base_fee,
            time_window: window,
            temporal_multiplier,
            demand_level: request.demand,
            demand_multiplier,
            order_value_multiplier: value_multiplier,
            weather_multiplier,
            adjusted_fee,
        },
    })
}

/// One labelled row of a displayed breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakdownLine {
    pub label: String,
    pub value: String,
}

/// Human-readable itemisation of a quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    pub base_rate: Decimal,
    pub distance_charge: Decimal,
    pub demand_level: DemandLevel,
    pub total_fee: Decimal,
    pub breakdown: Vec<BreakdownLine>,
}

impl PricingBreakdown {
    /// Look up a line by its label
    pub fn line(&self, label: &str) -> Option<&str> {
        self.breakdown
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

/// Build the display breakdown for a computed quote.
///
/// `service_label` is shown as the caller supplied it, even when it fell back
/// to the default rate.
pub fn build_breakdown(
    service_label: &str,
    distance_km: Decimal,
    result: &PricingResult,
) -> PricingBreakdown {
    let base_rate = result.components.base_rate;
    let distance_charge = DISTANCE_RATE_PER_KM
        .checked_mul(distance_km)
        .unwrap_or(Decimal::MAX);
    let demand_level = result.components.demand_level;

    let line = |label: String, value: String| BreakdownLine { label, value };
    let breakdown = vec![
        line("Base Rate".to_string(), format_currency(base_rate)),
        line(
            format!("Distance ({}km)", distance_km.normalize()),
            format_currency(distance_charge),
        ),
        line("Service Type".to_string(), service_label.to_string()),
        line(
            "Demand Level".to_string(),
            demand_level.as_str().to_uppercase(),
        ),
        line("Total".to_string(), format_currency(result.final_fee)),
    ];

    PricingBreakdown {
        base_rate,
        distance_charge,
        demand_level,
        total_fee: result.final_fee,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn quote(request: &PricingRequest) -> PricingResult {
        compute_fee_in_window(request, TimeWindow::Normal, Decimal::ONE).unwrap()
    }

    #[test]
    fn test_food_delivery_five_km() {
        let request = PricingRequest::new(Some(ServiceType::FoodDelivery), dec("5"));
        let result = quote(&request);
        assert_eq!(result.components.base_fee, dec("110"));
        assert_eq!(result.final_fee, dec("110.00"));
    }

    #[test]
    fn test_clamps_to_max() {
        let request = PricingRequest::new(Some(ServiceType::FoodDelivery), dec("50"));
        let result = quote(&request);
        assert_eq!(result.components.adjusted_fee, dec("650"));
        assert_eq!(result.final_fee, dec("500.00"));
    }

    #[test]
    fn test_clamps_to_min() {
        let request = PricingRequest::new(Some(ServiceType::BillPayments), Decimal::ZERO)
            .with_demand(DemandLevel::Low);
        // (40 + 0) * 0.8 * 0.9 = 28.8
        let result = quote(&request);
        assert_eq!(result.components.adjusted_fee, dec("28.8"));
        assert_eq!(result.final_fee, dec("35"));
    }

    #[test]
    fn test_unknown_service_defaults() {
        let result = quote(&PricingRequest::new(None, dec("1")));
        assert_eq!(result.components.base_rate, dec("50"));
        assert_eq!(result.components.service_multiplier, Decimal::ONE);
        assert_eq!(result.final_fee, dec("62"));
    }

    #[test]
    fn test_order_value_multiplier_thresholds() {
        assert_eq!(order_value_multiplier(dec("2000")), Decimal::ONE);
        assert_eq!(order_value_multiplier(dec("2000.01")), dec("1.05"));
        assert_eq!(order_value_multiplier(dec("5000")), dec("1.05"));
        assert_eq!(order_value_multiplier(dec("6000")), dec("1.10"));
    }

    #[test]
    fn test_all_multipliers_compose() {
        // (55 + 36) * 1.1 = 100.1; * 1.3 * 1.2 * 1.1 * 1.15 = 197.53733...
        let request = PricingRequest::new(Some(ServiceType::SurpriseGiftDelivery), dec("3"))
            .with_demand(DemandLevel::High)
            .with_order_value(dec("6000"));
        let result = compute_fee_in_window(&request, TimeWindow::Peak, dec("1.15")).unwrap();
        assert_eq!(result.components.base_fee, dec("100.1"));
        assert_eq!(result.final_fee, dec("197.54"));
    }

    #[test]
    fn test_time_context_selects_window() {
        let request = PricingRequest::new(Some(ServiceType::FoodDelivery), dec("5"));
        let result = compute_fee(&request, &TimeContext::new(22, 3), Decimal::ONE).unwrap();
        assert_eq!(result.components.time_window, TimeWindow::Late);
        assert_eq!(result.final_fee, dec("132"));
    }

    #[test]
    fn test_rejects_negative_inputs() {
        let request = PricingRequest::new(Some(ServiceType::FoodDelivery), dec("-1"));
        assert!(matches!(
            request.validate(),
            Err(PricingError::InvalidInput { field: "distance_km", .. })
        ));

        let request = PricingRequest::new(Some(ServiceType::FoodDelivery), dec("1"))
            .with_order_value(dec("-0.01"));
        assert!(matches!(
            compute_fee_in_window(&request, TimeWindow::Normal, Decimal::ONE),
            Err(PricingError::InvalidInput { field: "order_value", .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_weather() {
        let request = PricingRequest::new(Some(ServiceType::FoodDelivery), dec("1"));
        assert!(compute_fee_in_window(&request, TimeWindow::Normal, Decimal::ZERO).is_err());
    }

    #[test]
    fn test_extreme_distance_saturates() {
        let request = PricingRequest::new(Some(ServiceType::GroceryPabili), Decimal::MAX);
        let result = quote(&request);
        assert_eq!(result.final_fee, MAX_FEE);
    }

    #[test]
    fn test_breakdown_lines() {
        let request = PricingRequest::new(Some(ServiceType::FoodDelivery), dec("5"));
        let result = quote(&request);
        let breakdown = build_breakdown("Food Delivery", dec("5"), &result);

        assert_eq!(breakdown.base_rate, dec("50"));
        assert_eq!(breakdown.distance_charge, dec("60"));
        assert_eq!(breakdown.total_fee, dec("110"));
        assert_eq!(breakdown.line("Base Rate"), Some("₱50.00"));
        assert_eq!(breakdown.line("Distance (5km)"), Some("₱60.00"));
        assert_eq!(breakdown.line("Service Type"), Some("Food Delivery"));
        assert_eq!(breakdown.line("Demand Level"), Some("NORMAL"));
        assert_eq!(breakdown.line("Total"), Some("₱110.00"));
        assert_eq!(breakdown.breakdown.last().map(|l| l.label.as_str()), Some("Total"));
    }

    #[test]
    fn test_breakdown_fractional_distance_label() {
        let result = quote(&PricingRequest::new(None, dec("2.50")));
        let breakdown = build_breakdown("Laundry", dec("2.50"), &result);
        assert_eq!(breakdown.line("Distance (2.5km)"), Some("₱30.00"));
        assert_eq!(breakdown.line("Service Type"), Some("Laundry"));
    }
}
