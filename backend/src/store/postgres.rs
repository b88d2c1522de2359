//! PostgreSQL-backed data store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{OrderActivity, OrderStatus, PaymentMethod, PaymentProofRef};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{DataStore, StoreError};

/// Store reading the `orders` and `payment_proofs` tables
#[derive(Clone)]
pub struct PgDataStore {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct OrderActivityRow {
    id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct PaymentProofRow {
    id: Uuid,
    order_id: Option<Uuid>,
}

impl PgDataStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DataStore for PgDataStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn orders_since(
        &self,
        statuses: &[OrderStatus],
        since: DateTime<Utc>,
    ) -> Result<Vec<OrderActivity>, StoreError> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let rows = sqlx::query_as::<_, OrderActivityRow>(
            r#"
            SELECT id, created_at
            FROM orders
            WHERE status = ANY($1)
              AND created_at >= $2
            "#,
        )
        .bind(&statuses)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OrderActivity {
                id: row.id,
                created_at: row.created_at,
            })
            .collect())
    }

    async fn find_payment_proofs(
        &self,
        reference: &str,
        method: PaymentMethod,
        exclude_order: Option<Uuid>,
    ) -> Result<Vec<PaymentProofRef>, StoreError> {
        let rows = sqlx::query_as::<_, PaymentProofRow>(
            r#"
            SELECT id, order_id
            FROM payment_proofs
            WHERE reference_number = $1
              AND payment_method = $2
              AND ($3::uuid IS NULL OR order_id <> $3)
            "#,
        )
        .bind(reference)
        .bind(method.as_str())
        .bind(exclude_order)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PaymentProofRef {
                id: row.id,
                order_id: row.order_id,
            })
            .collect())
    }
}
