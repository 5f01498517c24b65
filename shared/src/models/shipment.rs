//! Shipment and reorder models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery state of a reorder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InTransit,
    Delivered,
}

impl OrderStatus {
    /// Orders that have not reached the store yet
    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::Delivered)
    }
}

/// A reorder placed with a supplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShipmentOrder {
    pub id: String,
    #[serde(alias = "name")]
    pub item_name: String,
    pub quantity: u32,
    pub status: OrderStatus,
    #[serde(default)]
    pub expected_at: Option<DateTime<Utc>>,
}

/// Upstream response wrapping the order list
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<ShipmentOrder>,
}

/// Count orders not yet delivered
pub fn count_open_orders(orders: &[ShipmentOrder]) -> usize {
    orders.iter().filter(|order| order.status.is_open()).count()
}
