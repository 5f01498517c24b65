//! Dashboard summary service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{weekly_revenue_series, AggregateStatsCalculator, DashboardSummary, Thresholds};

use super::inventory::InventoryService;
use crate::error::AppResult;
use crate::external::DataSource;

/// Weeks of revenue compared by the trend banner
const TREND_WEEKS: u32 = 2;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DataSource>,
    inventory: InventoryService,
    calculator: AggregateStatsCalculator,
}

impl DashboardService {
    pub fn new(source: Arc<dyn DataSource>, thresholds: Thresholds) -> Self {
        Self {
            inventory: InventoryService::new(source.clone(), thresholds),
            source,
            calculator: AggregateStatsCalculator::new(thresholds),
        }
    }

    /// Summary cards as of `now`
    ///
    /// The trend compares last week's revenue with this week's.
    pub async fn summary(&self, now: DateTime<Utc>) -> AppResult<DashboardSummary> {
        let (inventory, sales, orders) = tokio::try_join!(
            self.inventory.load_inventory(),
            self.inventory.load_sales(),
            self.source.fetch_orders()
        )?;

        let revenue = weekly_revenue_series(&sales, now, TREND_WEEKS);
        let summary = self
            .calculator
            .summarize(&inventory, &sales, &orders, &revenue, now);

        tracing::debug!(
            total_items = summary.total_items,
            low_stock = summary.low_stock_count,
            "Dashboard summary computed"
        );
        Ok(summary)
    }
}
