//! Data store abstraction over orders and payment proofs
//!
//! The pricing and validation services only read from the store. Order and
//! payment-proof tables are owned by the booking backend.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgDataStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{OrderActivity, OrderStatus, PaymentMethod, PaymentProofRef};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by store backends
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the records the pricing core depends on
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Short name used in logs and health output
    fn backend_tag(&self) -> &'static str;

    /// Check connectivity
    async fn ping(&self) -> Result<(), StoreError>;

    /// Orders in one of `statuses` created at or after `since`
    async fn orders_since(
        &self,
        statuses: &[OrderStatus],
        since: DateTime<Utc>,
    ) -> Result<Vec<OrderActivity>, StoreError>;

    /// Payment proofs carrying `reference` for `method`, optionally ignoring
    /// proofs attached to `exclude_order`
    async fn find_payment_proofs(
        &self,
        reference: &str,
        method: PaymentMethod,
        exclude_order: Option<Uuid>,
    ) -> Result<Vec<PaymentProofRef>, StoreError>;
}
