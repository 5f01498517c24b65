//! Inventory and sale records
//!
//! Upstream feeds deliver records with title-case keys ("Expiration Date") and
//! dates as strings. `Raw*` types mirror that wire shape and accept missing or
//! mistyped dates and quantities, so that [`crate::validation`] can reject them
//! with the name of the offending field.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inventory record as delivered by a data source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawInventoryRecord {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Price")]
    pub price: Decimal,
    #[serde(alias = "Purchase Date", alias = "purchaseDate", default)]
    pub purchase_date: Option<String>,
    #[serde(alias = "Expiration Date", alias = "expirationDate", default)]
    pub expiration_date: Option<String>,
    #[serde(alias = "Quantity", default)]
    pub quantity: Value,
    #[serde(alias = "Supplier", default)]
    pub supplier: String,
}

/// Sale record as delivered by a data source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSaleRecord {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Price")]
    pub price: Decimal,
    #[serde(alias = "Purchase Date", alias = "purchaseDate", default)]
    pub purchase_date: Option<String>,
    #[serde(alias = "Expiration Date", alias = "expirationDate", default)]
    pub expiration_date: Option<String>,
    /// Units sold in this transaction
    #[serde(alias = "Quantity", default)]
    pub quantity: Value,
    #[serde(alias = "Supplier", default)]
    pub supplier: String,
    #[serde(alias = "Sale Date", alias = "saleDate", default)]
    pub sale_date: Option<String>,
}

/// A validated inventory record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub name: String,
    pub price: Decimal,
    pub purchase_date: NaiveDate,
    pub expiration_date: NaiveDate,
    /// Units currently on hand
    pub quantity: u32,
    pub supplier: String,
}

impl InventoryRecord {
    /// Whole days from `today` until expiration; negative once expired
    pub fn days_until_expiration(&self, today: NaiveDate) -> i64 {
        (self.expiration_date - today).num_days()
    }
}

/// A validated sale record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleRecord {
    pub name: String,
    pub price: Decimal,
    pub purchase_date: NaiveDate,
    pub expiration_date: NaiveDate,
    /// Units sold in this transaction
    pub quantity: u32,
    pub supplier: String,
    pub sale_date: DateTime<Utc>,
}

impl SaleRecord {
    /// Revenue of this transaction
    pub fn revenue(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Days the sold units spent on the shelf before this sale
    pub fn shelf_days(&self) -> i64 {
        (self.sale_date.date_naive() - self.purchase_date).num_days()
    }
}
