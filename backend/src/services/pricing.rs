//! Delivery fee quoting and breakdowns

use rust_decimal::Decimal;
use shared::{
    build_breakdown, compute_fee, compute_fee_in_window, DemandLevel, PricingBreakdown,
    PricingRequest, PricingResult, RateTable, ServiceRate, ServiceType, TimeWindow,
};
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::services::demand::DemandEstimator;
use crate::services::weather::WeatherAdjustor;

/// Quote inputs as received from callers
#[derive(Debug, Clone)]
pub struct QuoteInput {
    /// Display label or slug; unknown labels use the default rate
    pub service_type: String,
    pub distance_km: Decimal,
    /// Estimated from the order store when absent
    pub demand: Option<DemandLevel>,
    pub order_value: Decimal,
}

/// Pricing service combining rate, time, demand and weather
#[derive(Clone)]
pub struct PricingService {
    demand: DemandEstimator,
    weather: WeatherAdjustor,
    clock: Arc<dyn Clock>,
    use_live_clock_for_breakdown: bool,
}

impl PricingService {
    pub fn new(
        demand: DemandEstimator,
        weather: WeatherAdjustor,
        clock: Arc<dyn Clock>,
        use_live_clock_for_breakdown: bool,
    ) -> Self {
        Self {
            demand,
            weather,
            clock,
            use_live_clock_for_breakdown,
        }
    }

    /// Quote a fee at the current local time
    pub async fn quote(&self, input: QuoteInput) -> AppResult<PricingResult> {
        let request = PricingRequest::new(resolve_service(&input.service_type), input.distance_km)
            .with_order_value(input.order_value);
        request.validate()?;

        let demand = match input.demand {
            Some(level) => level,
            None => self.demand.estimate().await,
        };
        let request = request.with_demand(demand);

        let time = self.clock.time_context();
        let weather = self.weather.sample().await;

        tracing::debug!(
            service = %input.service_type,
            distance_km = %input.distance_km,
            order_value = %input.order_value,
            demand = %demand,
            hour = time.hour,
            weather = %weather,
            "Quoting delivery fee"
        );

        Ok(compute_fee(&request, &time, weather)?)
    }

    /// Itemised fee for display at checkout
    pub async fn breakdown(
        &self,
        service_label: &str,
        distance_km: Decimal,
        order_value: Decimal,
    ) -> AppResult<PricingBreakdown> {
        let request = PricingRequest::new(resolve_service(service_label), distance_km)
            .with_order_value(order_value);
        request.validate()?;

        let demand = self.demand.estimate().await;
        let weather = self.weather.sample().await;
        let request = request.with_demand(demand);

        let window = if self.use_live_clock_for_breakdown {
            TimeWindow::classify(&self.clock.time_context())
        } else {
            TimeWindow::Normal
        };

        tracing::debug!(
            service = %service_label,
            distance_km = %distance_km,
            demand = %demand,
            window = ?window,
            "Building fee breakdown"
        );

        let result = compute_fee_in_window(&request, window, weather)?;
        Ok(build_breakdown(service_label, distance_km, &result))
    }

    pub async fn current_demand(&self) -> DemandLevel {
        self.demand.estimate().await
    }

    pub fn rates(&self) -> Vec<ServiceRate> {
        RateTable::entries()
    }
}

fn resolve_service(label: &str) -> Option<ServiceType> {
    let service = ServiceType::from_label(label);
    if service.is_none() {
        tracing::debug!("Unknown service type {:?}, using default rate", label);
    }
    service
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::PricingConfig;
    use crate::services::weather::FixedWeather;
    use crate::store::InMemoryStore;
    use chrono::{FixedOffset, TimeZone};
    use shared::WeatherCondition;
    use std::str::FromStr;
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Pricing service on an empty store (Low demand) at the given local hour
    fn service_at(hour: u32, live_breakdown: bool) -> PricingService {
        service_with_store(hour, live_breakdown, Arc::new(InMemoryStore::new()))
    }

    fn service_with_store(
        hour: u32,
        live_breakdown: bool,
        store: Arc<InMemoryStore>,
    ) -> PricingService {
        let manila = FixedOffset::east_opt(8 * 3600).unwrap();
        // Wednesday
        let clock = Arc::new(FixedClock(
            manila.with_ymd_and_hms(2024, 6, 5, hour, 0, 0).unwrap(),
        ));
        let demand = DemandEstimator::new(store, clock.clone(), Duration::from_secs(1));
        let weather = WeatherAdjustor::new(Arc::new(FixedWeather(WeatherCondition::Clear)));
        PricingService::new(demand, weather, clock, live_breakdown)
    }

    fn input(service: &str, km: &str) -> QuoteInput {
        QuoteInput {
            service_type: service.to_string(),
            distance_km: dec(km),
            demand: Some(DemandLevel::Normal),
            order_value: Decimal::ZERO,
        }
    }

    #[tokio::test]
    async fn test_quote_off_peak() {
        let result = service_at(10, false)
            .quote(input("Food Delivery", "5"))
            .await
            .unwrap();
        assert_eq!(result.final_fee, dec("110.00"));
    }

    #[tokio::test]
    async fn test_quote_at_peak_hour() {
        let result = service_at(12, false)
            .quote(input("Food Delivery", "5"))
            .await
            .unwrap();
        assert_eq!(result.final_fee, dec("143.00"));
    }

    #[tokio::test]
    async fn test_quote_estimates_missing_demand() {
        let mut request = input("Food Delivery", "5");
        request.demand = None;
        let result = service_at(10, false).quote(request).await.unwrap();
        assert_eq!(result.components.demand_level, DemandLevel::Low);
        assert_eq!(result.final_fee, dec("99.00"));
    }

    #[tokio::test]
    async fn test_quote_rejects_negative_distance() {
        let err = service_at(10, false)
            .quote(input("Food Delivery", "-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_quote_skips_demand_query() {
        let store = Arc::new(InMemoryStore::new());
        let mut request = input("Food Delivery", "-1");
        request.demand = None;
        let err = service_with_store(10, false, store.clone())
            .quote(request)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::Validation { .. }));
        assert_eq!(store.query_calls(), 0);
    }

    #[tokio::test]
    async fn test_breakdown_uses_live_clock_with_default_config() {
        let live = PricingConfig::default().use_live_clock_for_breakdown;
        let breakdown = service_at(12, live)
            .breakdown("Food Delivery", dec("5"), Decimal::ZERO)
            .await
            .unwrap();
        // Wednesday lunch peak, Low demand: 110 * 1.3 * 0.9
        assert_eq!(breakdown.total_fee, dec("128.70"));
    }

    #[tokio::test]
    async fn test_breakdown_pinned_to_normal_window() {
        let breakdown = service_at(12, false)
            .breakdown("Food Delivery", dec("5"), Decimal::ZERO)
            .await
            .unwrap();
        // Low demand on an empty store: 110 * 0.9
        assert_eq!(breakdown.total_fee, dec("99.00"));
        assert_eq!(breakdown.line("Demand Level"), Some("LOW"));
        assert_eq!(breakdown.line("Service Type"), Some("Food Delivery"));
    }

    #[tokio::test]
    async fn test_breakdown_with_live_clock() {
        let breakdown = service_at(12, true)
            .breakdown("Food Delivery", dec("5"), Decimal::ZERO)
            .await
            .unwrap();
        // 110 * 1.3 * 0.9
        assert_eq!(breakdown.total_fee, dec("128.70"));
    }

    #[test]
    fn test_rates_cover_catalog() {
        assert_eq!(service_at(10, false).rates().len(), ServiceType::ALL.len());
    }
}
