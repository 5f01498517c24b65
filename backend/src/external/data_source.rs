//! Data source abstraction for inventory snapshots
//!
//! The dashboard never generates its own data: every snapshot comes from a
//! [`DataSource`]. Production uses the upstream REST API; demos and tests use
//! [`FixtureDataSource`], which always returns the same records.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    DemandPoint, DemandSeries, OrderStatus, RawInventoryRecord, RawSaleRecord, ShipmentOrder,
};

use crate::error::{AppError, AppResult};

/// Supplier of raw inventory, sales, order and demand data
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short label reported by the health endpoint
    fn name(&self) -> &'static str;

    async fn fetch_inventory(&self) -> AppResult<Vec<RawInventoryRecord>>;

    async fn fetch_sales(&self) -> AppResult<Vec<RawSaleRecord>>;

    async fn fetch_orders(&self) -> AppResult<Vec<ShipmentOrder>>;

    /// Demand series for one item; empty when nothing is known about it
    async fn fetch_demand(&self, item_name: &str) -> AppResult<Vec<DemandSeries>>;
}

/// Snapshot served by [`FixtureDataSource`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub inventory: Vec<RawInventoryRecord>,
    #[serde(default)]
    pub sales: Vec<RawSaleRecord>,
    #[serde(default)]
    pub orders: Vec<ShipmentOrder>,
    /// Demand series keyed by item name
    #[serde(default)]
    pub demand: HashMap<String, Vec<DemandSeries>>,
}

impl Fixtures {
    /// Load fixtures from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Cannot read fixture file {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            AppError::Configuration(format!("Invalid fixture file {}: {}", path.display(), e))
        })
    }

    /// Built-in sample snapshot of a small grocery store
    pub fn sample() -> Self {
        let inventory = vec![
            raw_item("Organic Bananas", Decimal::new(299, 2), "2024-10-01", "2024-10-20", 150, "Fresh Farms"),
            raw_item("Whole Milk", Decimal::new(449, 2), "2024-10-08", "2024-10-18", 80, "Valley Dairy"),
            raw_item("Greek Yogurt", Decimal::new(199, 2), "2024-10-05", "2024-11-05", 6, "Valley Dairy"),
            raw_item("Sourdough Bread", Decimal::new(599, 2), "2024-10-12", "2024-10-14", 25, "Corner Bakery"),
        ];

        let sales = vec![
            raw_sale("Organic Bananas", Decimal::new(299, 2), "2024-10-01", "2024-10-20", 30, "Fresh Farms", "2024-10-08"),
            raw_sale("Organic Bananas", Decimal::new(299, 2), "2024-10-01", "2024-10-20", 42, "Fresh Farms", "2024-10-10"),
            raw_sale("Organic Bananas", Decimal::new(299, 2), "2024-10-01", "2024-10-20", 28, "Fresh Farms", "2024-10-12"),
            raw_sale("Whole Milk", Decimal::new(449, 2), "2024-10-08", "2024-10-18", 12, "Valley Dairy", "2024-10-11"),
            raw_sale("Greek Yogurt", Decimal::new(199, 2), "2024-10-05", "2024-11-05", 4, "Valley Dairy", "2024-10-09"),
        ];

        let orders = vec![
            ShipmentOrder {
                id: "PO-1001".to_string(),
                item_name: "Greek Yogurt".to_string(),
                quantity: 200,
                status: OrderStatus::InTransit,
                expected_at: None,
            },
            ShipmentOrder {
                id: "PO-1002".to_string(),
                item_name: "Whole Milk".to_string(),
                quantity: 120,
                status: OrderStatus::Pending,
                expected_at: None,
            },
            ShipmentOrder {
                id: "PO-0998".to_string(),
                item_name: "Organic Bananas".to_string(),
                quantity: 300,
                status: OrderStatus::Delivered,
                expected_at: None,
            },
        ];

        let mut demand = HashMap::new();
        demand.insert(
            "Organic Bananas".to_string(),
            vec![
                series("Google Trends", &[62.0, 64.0, 70.0, 71.0, 75.0]),
                series("Twitter", &[40.0, 41.0, 39.0, 42.0, 42.0]),
                series("TikTok", &[20.0, 26.0, 31.0, 30.0, 36.0]),
                series("Events", &[50.0, 48.0, 45.0, 44.0, 41.0]),
            ],
        );

        Self {
            inventory,
            sales,
            orders,
            demand,
        }
    }
}

fn raw_item(
    name: &str,
    price: Decimal,
    purchase_date: &str,
    expiration_date: &str,
    quantity: i64,
    supplier: &str,
) -> RawInventoryRecord {
    RawInventoryRecord {
        name: name.to_string(),
        price,
        purchase_date: Some(purchase_date.to_string()),
        expiration_date: Some(expiration_date.to_string()),
        quantity: quantity.into(),
        supplier: supplier.to_string(),
    }
}

fn raw_sale(
    name: &str,
    price: Decimal,
    purchase_date: &str,
    expiration_date: &str,
    quantity: i64,
    supplier: &str,
    sale_date: &str,
) -> RawSaleRecord {
    RawSaleRecord {
        name: name.to_string(),
        price,
        purchase_date: Some(purchase_date.to_string()),
        expiration_date: Some(expiration_date.to_string()),
        quantity: quantity.into(),
        supplier: supplier.to_string(),
        sale_date: Some(sale_date.to_string()),
    }
}

/// Daily series starting 2024-10-01
fn series(source: &str, values: &[f64]) -> DemandSeries {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 10, 1).unwrap_or_default();
    DemandSeries {
        source: source.to_string(),
        points: values
            .iter()
            .zip(start.iter_days())
            .map(|(value, date)| DemandPoint {
                date,
                value: *value,
            })
            .collect(),
    }
}

/// In-memory data source returning a fixed snapshot
#[derive(Debug, Clone, Default)]
pub struct FixtureDataSource {
    fixtures: Fixtures,
}

impl FixtureDataSource {
    pub fn new(fixtures: Fixtures) -> Self {
        Self { fixtures }
    }
}

#[async_trait]
impl DataSource for FixtureDataSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_inventory(&self) -> AppResult<Vec<RawInventoryRecord>> {
        Ok(self.fixtures.inventory.clone())
    }

    async fn fetch_sales(&self) -> AppResult<Vec<RawSaleRecord>> {
        Ok(self.fixtures.sales.clone())
    }

    async fn fetch_orders(&self) -> AppResult<Vec<ShipmentOrder>> {
        Ok(self.fixtures.orders.clone())
    }

    async fn fetch_demand(&self, item_name: &str) -> AppResult<Vec<DemandSeries>> {
        Ok(self
            .fixtures
            .demand
            .get(item_name)
            .cloned()
            .unwrap_or_default())
    }
}
