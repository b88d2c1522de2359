//! Demand estimation from recent order activity

use chrono::{Duration as ChronoDuration, Utc};
use shared::{DemandLevel, OrderCounts, OrderStatus};
use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::store::{DataStore, StoreError};

/// Estimates the current demand tier from the order store
#[derive(Clone)]
pub struct DemandEstimator {
    store: Arc<dyn DataStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl DemandEstimator {
    pub fn new(store: Arc<dyn DataStore>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            store,
            clock,
            timeout,
        }
    }

    /// Current demand level. Store failures and timeouts yield `Normal`.
    pub async fn estimate(&self) -> DemandLevel {
        match tokio::time::timeout(self.timeout, self.order_counts()).await {
            Ok(Ok(counts)) => {
                let level = DemandLevel::from_order_counts(counts);
                tracing::debug!(
                    active = counts.active,
                    recent = counts.recent,
                    level = %level,
                    "Estimated demand"
                );
                level
            }
            Ok(Err(e)) => {
                tracing::warn!("Demand query failed, assuming normal demand: {}", e);
                DemandLevel::Normal
            }
            Err(_) => {
                tracing::warn!(
                    "Demand query exceeded {:?}, assuming normal demand",
                    self.timeout
                );
                DemandLevel::Normal
            }
        }
    }

    /// Count active orders from the last hour.
    ///
    /// `recent` excludes orders created exactly at the cutoff.
    pub async fn order_counts(&self) -> Result<OrderCounts, StoreError> {
        let now = self.clock.now().with_timezone(&Utc);
        let cutoff = now - ChronoDuration::hours(1);

        let orders = self.store.orders_since(&OrderStatus::ACTIVE, cutoff).await?;
        let recent = orders.iter().filter(|o| o.created_at > cutoff).count();

        Ok(OrderCounts {
            active: orders.len(),
            recent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::InMemoryStore;
    use chrono::{FixedOffset, TimeZone};

    fn clock() -> Arc<FixedClock> {
        let manila = FixedOffset::east_opt(8 * 3600).unwrap();
        Arc::new(FixedClock(
            manila.with_ymd_and_hms(2024, 6, 5, 15, 0, 0).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_cutoff_order_counts_as_active_only() {
        let clock = clock();
        let store = Arc::new(InMemoryStore::new());
        let now = clock.now().with_timezone(&Utc);
        store.insert_order(OrderStatus::Pending, now - ChronoDuration::hours(1));
        store.insert_order(OrderStatus::Assigned, now - ChronoDuration::minutes(5));

        let estimator = DemandEstimator::new(store, clock, Duration::from_secs(1));
        let counts = estimator.order_counts().await.unwrap();
        assert_eq!(counts, OrderCounts { active: 2, recent: 1 });
    }

    #[tokio::test]
    async fn test_empty_store_is_low() {
        let estimator = DemandEstimator::new(
            Arc::new(InMemoryStore::new()),
            clock(),
            Duration::from_secs(1),
        );
        assert_eq!(estimator.estimate().await, DemandLevel::Low);
    }
}
