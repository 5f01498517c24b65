//! Per-item sales metrics and history series

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SaleRecord;

/// Totals shown on an item's detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesMetrics {
    pub total_revenue: Decimal,
    pub total_quantity: u64,
    /// Units sold per shelf-day; `None` when no shelf time is recorded
    pub average_daily_sales: Option<Decimal>,
}

/// One point of the sales history chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesHistoryPoint {
    pub date: NaiveDate,
    pub quantity: u32,
    pub revenue: Decimal,
}

/// Sales whose name matches exactly
pub fn sales_for_item<'a>(sales: &'a [SaleRecord], name: &str) -> Vec<&'a SaleRecord> {
    sales.iter().filter(|sale| sale.name == name).collect()
}

pub fn sales_metrics(sales: &[&SaleRecord]) -> SalesMetrics {
    let total_revenue: Decimal = sales.iter().map(|sale| sale.revenue()).sum();
    let total_quantity: u64 = sales.iter().map(|sale| u64::from(sale.quantity)).sum();
    let shelf_days: i64 = sales.iter().map(|sale| sale.shelf_days()).sum();

    let average_daily_sales = if shelf_days > 0 {
        Some((Decimal::from(total_quantity) / Decimal::from(shelf_days)).round_dp(2))
    } else {
        None
    };

    SalesMetrics {
        total_revenue,
        total_quantity,
        average_daily_sales,
    }
}

/// Chart series, oldest sale first
pub fn sales_history(sales: &[&SaleRecord]) -> Vec<SalesHistoryPoint> {
    let mut ordered: Vec<&SaleRecord> = sales.to_vec();
    ordered.sort_by_key(|sale| sale.sale_date);
    ordered
        .into_iter()
        .map(|sale| SalesHistoryPoint {
            date: sale.sale_date.date_naive(),
            quantity: sale.quantity,
            revenue: sale.revenue(),
        })
        .collect()
}
