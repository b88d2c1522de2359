//! Demand levels and order-volume thresholds

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Surge-pricing tier derived from recent order volume.
///
/// Variants are declared in surcharge order so `Ord` follows the multiplier.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    Low,
    #[default]
    Normal,
    High,
    Surge,
}

impl DemandLevel {
    pub fn multiplier(&self) -> Decimal {
        match self {
            DemandLevel::Low => Decimal::new(9, 1),
            DemandLevel::Normal => Decimal::ONE,
            DemandLevel::High => Decimal::new(12, 1),
            DemandLevel::Surge => Decimal::new(15, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::Low => "low",
            DemandLevel::Normal => "normal",
            DemandLevel::High => "high",
            DemandLevel::Surge => "surge",
        }
    }

    /// Map order counts to a tier. Thresholds are checked from the top down.
    pub fn from_order_counts(counts: OrderCounts) -> Self {
        let OrderCounts { active, recent } = counts;
        if active >= 25 || recent >= 15 {
            DemandLevel::Surge
        } else if active >= 18 || recent >= 10 {
            DemandLevel::High
        } else if active >= 8 || recent >= 5 {
            DemandLevel::Normal
        } else {
            DemandLevel::Low
        }
    }
}

impl std::fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DemandLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(DemandLevel::Low),
            "normal" => Ok(DemandLevel::Normal),
            "high" => Ok(DemandLevel::High),
            "surge" => Ok(DemandLevel::Surge),
            other => Err(format!("Unknown demand level: {}", other)),
        }
    }
}

/// Order counts observed over the last hour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrderCounts {
    /// Orders in an active status created within the window
    pub active: usize,
    /// Subset created strictly after the window start
    pub recent: usize,
}
