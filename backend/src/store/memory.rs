//! In-memory data store for local runs and tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{OrderActivity, OrderStatus, PaymentMethod, PaymentProofRef};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use uuid::Uuid;

use super::{DataStore, StoreError};

#[derive(Debug, Clone)]
struct StoredOrder {
    id: Uuid,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredPaymentProof {
    id: Uuid,
    order_id: Option<Uuid>,
    reference_number: String,
    payment_method: PaymentMethod,
}

/// Data store held in process memory
#[derive(Default)]
pub struct InMemoryStore {
    orders: RwLock<Vec<StoredOrder>>,
    payment_proofs: RwLock<Vec<StoredPaymentProof>>,
    failing: AtomicBool,
    query_delay: Option<Duration>,
    query_calls: AtomicU64,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every query, to exercise caller timeouts
    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = Some(delay);
        self
    }

    /// Make every query fail until reset
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Number of queries served
    pub fn query_calls(&self) -> u64 {
        self.query_calls.load(Ordering::Relaxed)
    }

    pub fn insert_order(&self, status: OrderStatus, created_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        write(&self.orders).push(StoredOrder {
            id,
            status,
            created_at,
        });
        id
    }

    pub fn insert_payment_proof(
        &self,
        reference_number: &str,
        payment_method: PaymentMethod,
        order_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        write(&self.payment_proofs).push(StoredPaymentProof {
            id,
            order_id,
            reference_number: reference_number.to_string(),
            payment_method,
        });
        id
    }

    async fn begin_query(&self) -> Result<(), StoreError> {
        self.query_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = self.query_delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("in-memory store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("in-memory store set to fail".to_string()));
        }
        Ok(())
    }

    async fn orders_since(
        &self,
        statuses: &[OrderStatus],
        since: DateTime<Utc>,
    ) -> Result<Vec<OrderActivity>, StoreError> {
        self.begin_query().await?;
        Ok(read(&self.orders)
            .iter()
            .filter(|o| statuses.contains(&o.status) && o.created_at >= since)
            .map(|o| OrderActivity {
                id: o.id,
                created_at: o.created_at,
            })
            .collect())
    }

    async fn find_payment_proofs(
        &self,
        reference: &str,
        method: PaymentMethod,
        exclude_order: Option<Uuid>,
    ) -> Result<Vec<PaymentProofRef>, StoreError> {
        self.begin_query().await?;
        Ok(read(&self.payment_proofs)
            .iter()
            .filter(|p| p.reference_number == reference && p.payment_method == method)
            // Mirrors SQL `order_id <> $3`: proofs without an order never match
            .filter(|p| match exclude_order {
                Some(excluded) => p.order_id.is_some_and(|id| id != excluded),
                None => true,
            })
            .map(|p| PaymentProofRef {
                id: p.id,
                order_id: p.order_id,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn test_orders_since_filters_status_and_time() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        store.insert_order(OrderStatus::Pending, now);
        store.insert_order(OrderStatus::Delivered, now);
        store.insert_order(OrderStatus::InTransit, now - ChronoDuration::hours(2));

        let since = now - ChronoDuration::hours(1);
        let orders = store.orders_since(&OrderStatus::ACTIVE, since).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(store.query_calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = InMemoryStore::new();
        store.set_failing(true);
        assert!(store.ping().await.is_err());
        assert!(store
            .orders_since(&OrderStatus::ACTIVE, Utc::now())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_payment_proof_exclusion() {
        let store = InMemoryStore::new();
        let order = Uuid::new_v4();
        store.insert_payment_proof("1234567890123", PaymentMethod::GCash, Some(order));

        let found = store
            .find_payment_proofs("1234567890123", PaymentMethod::GCash, None)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let excluded = store
            .find_payment_proofs("1234567890123", PaymentMethod::GCash, Some(order))
            .await
            .unwrap();
        assert!(excluded.is_empty());

        let other_method = store
            .find_payment_proofs("1234567890123", PaymentMethod::PayMaya, None)
            .await
            .unwrap();
        assert!(other_method.is_empty());
    }
}
