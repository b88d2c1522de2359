//! Order and payment models read by the pricing and validation layers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery order lifecycle status, stored with its display spelling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Assigned,
    #[serde(rename = "Picked Up")]
    PickedUp,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Statuses that count toward current demand
    pub const ACTIVE: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Assigned,
        OrderStatus::PickedUp,
        OrderStatus::InTransit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Assigned => "Assigned",
            OrderStatus::PickedUp => "Picked Up",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal order projection used for demand estimation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderActivity {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// E-wallet providers accepted for QR payments
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    GCash,
    PayMaya,
    GoTyme,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::GCash => "GCash",
            PaymentMethod::PayMaya => "PayMaya",
            PaymentMethod::GoTyme => "GoTyme",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GCash" => Ok(PaymentMethod::GCash),
            "PayMaya" => Ok(PaymentMethod::PayMaya),
            "GoTyme" => Ok(PaymentMethod::GoTyme),
            other => Err(format!("Unsupported payment method: {}", other)),
        }
    }
}

/// Stored proof-of-payment reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentProofRef {
    pub id: Uuid,
    pub order_id: Option<Uuid>,
}
