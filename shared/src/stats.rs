//! Dashboard aggregate statistics

use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::models::{
    count_open_orders, DashboardSummary, DemandSeries, DemandSignal, InventoryRecord, SaleRecord,
    ShipmentOrder, Trend, TrendDirection,
};
use crate::types::{Thresholds, TimeWindow};

/// Length of the trailing sales window
pub const WEEKLY_SALES_DAYS: i64 = 7;

/// Folds inventory and sales snapshots into dashboard summary figures
#[derive(Debug, Clone, Copy)]
pub struct AggregateStatsCalculator {
    thresholds: Thresholds,
}

impl AggregateStatsCalculator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Every record counts, duplicates by name included
    pub fn total_items(&self, inventory: &[InventoryRecord]) -> usize {
        inventory.len()
    }

    pub fn low_stock_count(&self, inventory: &[InventoryRecord]) -> usize {
        inventory
            .iter()
            .filter(|record| self.thresholds.is_low_stock(record.quantity))
            .count()
    }

    /// Revenue of sales dated within `[now - 7 days, now]`
    pub fn weekly_sales(&self, sales: &[SaleRecord], now: DateTime<Utc>) -> Decimal {
        let window = TimeWindow::trailing_days(now, WEEKLY_SALES_DAYS);
        sales
            .iter()
            .filter(|sale| window.contains(sale.sale_date))
            .map(SaleRecord::revenue)
            .sum()
    }

    /// Build the summary cards for one dashboard refresh
    ///
    /// An undefined trend (empty series, zero baseline) leaves `trend` unset.
    pub fn summarize(
        &self,
        inventory: &[InventoryRecord],
        sales: &[SaleRecord],
        orders: &[ShipmentOrder],
        demand_series: &[f64],
        now: DateTime<Utc>,
    ) -> DashboardSummary {
        DashboardSummary {
            total_items: self.total_items(inventory),
            low_stock_count: self.low_stock_count(inventory),
            weekly_sales: self.weekly_sales(sales, now),
            trend: trend(demand_series).ok(),
            pending_orders: count_open_orders(orders),
        }
    }
}

/// Percent change between the first and last observation of an ordered series
pub fn trend(series: &[f64]) -> CoreResult<Trend> {
    let (Some(&first), Some(&last)) = (series.first(), series.last()) else {
        return Err(CoreError::EmptySeries);
    };
    if first == 0.0 {
        return Err(CoreError::DivisionByZero);
    }

    let change = (last - first) / first;
    Ok(Trend {
        percent_change: change.abs() * 100.0,
        direction: if change > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
    })
}

/// Revenue per trailing week, oldest first
///
/// The newest week is `[now - 7 days, now]` like [`AggregateStatsCalculator::weekly_sales`];
/// earlier weeks are half-open so no sale is counted twice.
pub fn weekly_revenue_series(sales: &[SaleRecord], now: DateTime<Utc>, weeks: u32) -> Vec<f64> {
    let week = Duration::days(WEEKLY_SALES_DAYS);
    (0..i32::try_from(weeks).unwrap_or(i32::MAX))
        .rev()
        .map(|offset| {
            let end = now - week * offset;
            let start = end - week;
            sales
                .iter()
                .filter(|sale| {
                    sale.sale_date >= start
                        && if offset == 0 {
                            sale.sale_date <= end
                        } else {
                            sale.sale_date < end
                        }
                })
                .map(SaleRecord::revenue)
                .sum::<Decimal>()
                .to_f64()
                .unwrap_or_default()
        })
        .collect()
}

/// Signed percent trend of one demand source
pub fn demand_signal(series: &DemandSeries) -> CoreResult<DemandSignal> {
    let trend = trend(&series.values())?;
    let signed = match trend.direction {
        TrendDirection::Up => trend.percent_change,
        TrendDirection::Down => -trend.percent_change,
    };
    Ok(DemandSignal::new(series.source.clone(), signed))
}
