//! HTTP handlers for form field and payment reference validation

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{FieldCheck, FieldKind, PaymentMethod};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldInput {
    pub field: FieldKind,
    pub value: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateFieldsRequest {
    #[validate(length(min = 1, max = 50))]
    pub fields: Vec<FieldInput>,
}

#[derive(Debug, Serialize)]
pub struct FieldResult {
    pub field: FieldKind,
    #[serde(flatten)]
    pub check: FieldCheck,
}

#[derive(Debug, Serialize)]
pub struct ValidateFieldsResponse {
    pub all_valid: bool,
    pub results: Vec<FieldResult>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentReferenceRequest {
    #[validate(length(min = 1, max = 64))]
    pub reference: String,
    pub payment_method: PaymentMethod,
    pub order_id: Option<Uuid>,
}

/// Validate a batch of form fields
pub async fn validate_fields(
    Json(body): Json<ValidateFieldsRequest>,
) -> AppResult<Json<ValidateFieldsResponse>> {
    body.validate()?;
    let results: Vec<FieldResult> = body
        .fields
        .iter()
        .map(|input| FieldResult {
            field: input.field,
            check: FieldCheck::from(input.field.validate(&input.value)),
        })
        .collect();

    Ok(Json(ValidateFieldsResponse {
        all_valid: results.iter().all(|r| r.check.is_valid),
        results,
    }))
}

/// Validate a QR payment reference and check it has not been used before
pub async fn validate_payment_reference(
    State(state): State<AppState>,
    Json(body): Json<PaymentReferenceRequest>,
) -> AppResult<Json<FieldCheck>> {
    body.validate()?;
    let check = state
        .payments
        .validate_reference_code(&body.reference, body.payment_method, body.order_id)
        .await;
    Ok(Json(check))
}
