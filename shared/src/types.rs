//! Common types used across the platform

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency glyph used on customer-facing amounts (Philippine peso)
pub const CURRENCY_SYMBOL: &str = "₱";

/// Round a currency amount to 2 decimal places, half away from zero
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, e.g. `₱110.00`
pub fn format_currency(amount: Decimal) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, round_currency(amount))
}

/// Result of checking a single field, shaped for form display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldCheck {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldCheck {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

impl From<Result<(), &'static str>> for FieldCheck {
    fn from(result: Result<(), &'static str>) -> Self {
        match result {
            Ok(()) => FieldCheck::valid(),
            Err(msg) => FieldCheck::invalid(msg),
        }
    }
}
