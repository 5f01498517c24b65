//! Per-item health assessment

use serde::{Deserialize, Serialize};

/// Health state of an inventory item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    HealthyStock,
    LowStock,
    CriticalNearExpiration,
    Expired,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::HealthyStock => write!(f, "Healthy Stock"),
            HealthStatus::LowStock => write!(f, "Low Stock"),
            HealthStatus::CriticalNearExpiration => write!(f, "Critical Near Expiration"),
            HealthStatus::Expired => write!(f, "Expired"),
        }
    }
}

/// Projected stock left on the expiration date
///
/// Serialized as a whole number, or `null` when the item lacks the sales
/// history needed to estimate a depletion rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum PredictedQuantity {
    Units(u32),
    NotApplicable,
}

impl PredictedQuantity {
    pub fn units(&self) -> Option<u32> {
        match self {
            PredictedQuantity::Units(units) => Some(*units),
            PredictedQuantity::NotApplicable => None,
        }
    }
}

impl From<Option<u32>> for PredictedQuantity {
    fn from(value: Option<u32>) -> Self {
        value.map_or(PredictedQuantity::NotApplicable, PredictedQuantity::Units)
    }
}

impl From<PredictedQuantity> for Option<u32> {
    fn from(value: PredictedQuantity) -> Self {
        value.units()
    }
}

impl std::fmt::Display for PredictedQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictedQuantity::Units(units) => write!(f, "{} units", units),
            PredictedQuantity::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Derived health classification for one inventory record
///
/// Valid only for the snapshot and reference date it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    pub name: String,
    pub quantity: u32,
    pub days_until_expiration: i64,
    pub predicted_quantity_at_expiration: PredictedQuantity,
    pub status: HealthStatus,
}

impl Assessment {
    /// Restocking is offered for low stock and for items that ran out
    pub fn restock_recommended(&self) -> bool {
        self.status == HealthStatus::LowStock || self.quantity == 0
    }
}
