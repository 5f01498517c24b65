//! Inventory service: loads snapshots from the data source and assesses them

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    filter_by_name, parse_inventory, parse_sales, sales_for_item, sales_history, sales_metrics,
    Assessment, DataQualityWarning, InventoryRecord, SaleRecord, SalesHistoryPoint, SalesMetrics,
    StatusClassifier, Thresholds,
};

use crate::error::{AppError, AppResult};
use crate::external::DataSource;

/// Inventory service for assessing stock health
#[derive(Clone)]
pub struct InventoryService {
    source: Arc<dyn DataSource>,
    classifier: StatusClassifier,
}

/// One inventory row of the dashboard table
#[derive(Debug, Clone, Serialize)]
pub struct AssessedItem {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub assessment: Assessment,
    pub restock_recommended: bool,
}

/// Everything the item detail view shows
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetails {
    pub assessment: Assessment,
    pub inventory: InventoryRecord,
    pub sales: Vec<SaleRecord>,
    pub metrics: SalesMetrics,
    pub history: Vec<SalesHistoryPoint>,
}

/// Flat CSV row of an assessed item
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRow {
    pub name: String,
    pub supplier: String,
    pub price: Decimal,
    pub quantity: u32,
    pub purchase_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub days_until_expiration: i64,
    pub predicted_quantity_at_expiration: Option<u32>,
    pub status: String,
    pub restock_recommended: bool,
}

impl From<&AssessedItem> for AssessmentRow {
    fn from(item: &AssessedItem) -> Self {
        Self {
            name: item.record.name.clone(),
            supplier: item.record.supplier.clone(),
            price: item.record.price,
            quantity: item.record.quantity,
            purchase_date: item.record.purchase_date,
            expiration_date: item.record.expiration_date,
            days_until_expiration: item.assessment.days_until_expiration,
            predicted_quantity_at_expiration: item.assessment.predicted_quantity_at_expiration.units(),
            status: item.assessment.status.to_string(),
            restock_recommended: item.restock_recommended,
        }
    }
}

impl InventoryService {
    pub fn new(source: Arc<dyn DataSource>, thresholds: Thresholds) -> Self {
        Self {
            source,
            classifier: StatusClassifier::new(thresholds),
        }
    }

    /// Fetch and validate the inventory snapshot
    pub async fn load_inventory(&self) -> AppResult<Vec<InventoryRecord>> {
        let raw = self.source.fetch_inventory().await?;
        let parsed = parse_inventory(&raw)?;
        log_warnings(&parsed.warnings);
        Ok(parsed.records)
    }

    /// Fetch and validate the sales snapshot
    pub async fn load_sales(&self) -> AppResult<Vec<SaleRecord>> {
        let raw = self.source.fetch_sales().await?;
        let parsed = parse_sales(&raw)?;
        log_warnings(&parsed.warnings);
        Ok(parsed.records)
    }

    /// Assessed inventory, optionally filtered by name
    pub async fn list_items(&self, query: &str, today: NaiveDate) -> AppResult<Vec<AssessedItem>> {
        let (inventory, sales) = tokio::try_join!(self.load_inventory(), self.load_sales())?;

        let items = filter_by_name(&inventory, query)
            .into_iter()
            .map(|record| {
                let assessment = self.classifier.assess(record, &sales, today);
                AssessedItem {
                    record: record.clone(),
                    restock_recommended: assessment.restock_recommended(),
                    assessment,
                }
            })
            .collect();

        Ok(items)
    }

    /// Assessment, sales and sales metrics for one item
    pub async fn item_details(&self, name: &str, today: NaiveDate) -> AppResult<ItemDetails> {
        let (inventory, sales) = tokio::try_join!(self.load_inventory(), self.load_sales())?;

        let record = inventory
            .into_iter()
            .find(|record| record.name == name)
            .ok_or_else(|| AppError::NotFound(format!("Item {}", name)))?;

        let item_sales = sales_for_item(&sales, name);
        let details = ItemDetails {
            assessment: self.classifier.assess(&record, &sales, today),
            metrics: sales_metrics(&item_sales),
            history: sales_history(&item_sales),
            sales: item_sales.into_iter().cloned().collect(),
            inventory: record,
        };

        Ok(details)
    }

    /// Export rows as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

fn log_warnings(warnings: &[DataQualityWarning]) {
    for warning in warnings {
        tracing::warn!(
            record = %warning.record,
            field = %warning.field,
            "Data quality warning: {}",
            warning.message
        );
    }
}
