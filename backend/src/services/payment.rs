//! QR payment reference checks

use shared::{normalize_reference, validate_qr_reference, FieldCheck, PaymentMethod};
use std::sync::Arc;
use uuid::Uuid;

use crate::store::DataStore;

/// Validates payment references against format rules and prior use
#[derive(Clone)]
pub struct PaymentReferenceService {
    store: Arc<dyn DataStore>,
}

impl PaymentReferenceService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Check the reference format, then reject references already attached to
    /// another order paid with the same method.
    ///
    /// Store failures produce an invalid result rather than an error.
    pub async fn validate_reference_code(
        &self,
        reference: &str,
        method: PaymentMethod,
        order_id: Option<Uuid>,
    ) -> FieldCheck {
        if validate_qr_reference(reference, method).is_err() {
            return FieldCheck::invalid(format!("Invalid {} reference format", method));
        }

        let reference = normalize_reference(reference);
        match self
            .store
            .find_payment_proofs(&reference, method, order_id)
            .await
        {
            Ok(existing) if existing.is_empty() => FieldCheck::valid(),
            Ok(existing) => {
                tracing::info!(
                    method = %method,
                    matches = existing.len(),
                    "Rejected reused payment reference"
                );
                FieldCheck::invalid("This reference number has already been used")
            }
            Err(e) => {
                tracing::warn!("Payment reference lookup failed: {}", e);
                FieldCheck::invalid("Error validating reference code")
            }
        }
    }
}
