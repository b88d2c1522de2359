//! Service catalog and rate table

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Courier service categories offered by the booking client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceType {
    #[serde(rename = "Food Delivery", alias = "food_delivery")]
    FoodDelivery,
    #[serde(rename = "Bill Payments", alias = "bill_payments")]
    BillPayments,
    #[serde(rename = "Pick-up & Drop", alias = "pickup_and_drop")]
    PickupAndDrop,
    #[serde(rename = "Surprise Gift Delivery", alias = "surprise_gift_delivery")]
    SurpriseGiftDelivery,
    #[serde(rename = "Medicine Delivery", alias = "medicine_delivery")]
    MedicineDelivery,
    #[serde(rename = "Grocery / Pabili", alias = "grocery_pabili")]
    GroceryPabili,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::FoodDelivery,
        ServiceType::BillPayments,
        ServiceType::PickupAndDrop,
        ServiceType::SurpriseGiftDelivery,
        ServiceType::MedicineDelivery,
        ServiceType::GroceryPabili,
    ];

    /// Customer-facing label, also the stored value on orders
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::FoodDelivery => "Food Delivery",
            ServiceType::BillPayments => "Bill Payments",
            ServiceType::PickupAndDrop => "Pick-up & Drop",
            ServiceType::SurpriseGiftDelivery => "Surprise Gift Delivery",
            ServiceType::MedicineDelivery => "Medicine Delivery",
            ServiceType::GroceryPabili => "Grocery / Pabili",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            ServiceType::FoodDelivery => "food_delivery",
            ServiceType::BillPayments => "bill_payments",
            ServiceType::PickupAndDrop => "pickup_and_drop",
            ServiceType::SurpriseGiftDelivery => "surprise_gift_delivery",
            ServiceType::MedicineDelivery => "medicine_delivery",
            ServiceType::GroceryPabili => "grocery_pabili",
        }
    }

    /// Parse a label leniently; unknown labels yield `None` rather than an error
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ServiceType::ALL
            .into_iter()
            .find(|t| t.label() == trimmed || t.slug() == trimmed)
            .ok_or_else(|| UnknownServiceType(trimmed.to_string()))
    }
}

/// Label that does not name a catalog service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown service type: {0}")]
pub struct UnknownServiceType(pub String);

/// Base rate and service multiplier for one service category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateTableEntry {
    pub base_rate: Decimal,
    pub service_multiplier: Decimal,
}

/// Catalog entry as listed to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceRate {
    pub service_type: ServiceType,
    #[serde(flatten)]
    pub rate: RateTableEntry,
}

/// Static rate table keyed by service type
pub struct RateTable;

impl RateTable {
    /// Entry applied to labels outside the catalog
    pub const DEFAULT: RateTableEntry = RateTableEntry {
        base_rate: Decimal::from_parts(50, 0, 0, false, 0),
        service_multiplier: Decimal::ONE,
    };

    pub fn entry(service: Option<ServiceType>) -> RateTableEntry {
        let (base_rate, multiplier_tenths) = match service {
            Some(ServiceType::FoodDelivery) => (50, 10),
            Some(ServiceType::BillPayments) => (40, 8),
            Some(ServiceType::PickupAndDrop) => (60, 12),
            Some(ServiceType::SurpriseGiftDelivery) => (55, 11),
            Some(ServiceType::MedicineDelivery) => (65, 13),
            Some(ServiceType::GroceryPabili) => (70, 14),
            None => return Self::DEFAULT,
        };
        RateTableEntry {
            base_rate: Decimal::from(base_rate),
            service_multiplier: Decimal::new(multiplier_tenths, 1),
        }
    }

    pub fn base_rate(service: Option<ServiceType>) -> Decimal {
        Self::entry(service).base_rate
    }

    pub fn service_multiplier(service: Option<ServiceType>) -> Decimal {
        Self::entry(service).service_multiplier
    }

    /// Full catalog in display order
    pub fn entries() -> Vec<ServiceRate> {
        ServiceType::ALL
            .into_iter()
            .map(|service_type| ServiceRate {
                service_type,
                rate: Self::entry(Some(service_type)),
            })
            .collect()
    }
}
