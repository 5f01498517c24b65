//! Inventory health classification
//!
//! Checks run in a fixed order and the first match wins:
//! 1. expired (days until expiration < 0)
//! 2. critical near expiration (days <= proximity threshold)
//! 3. low stock (quantity < low-stock threshold)
//! 4. healthy stock

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Assessment, HealthStatus, InventoryRecord, PredictedQuantity, SaleRecord};
use crate::types::Thresholds;

/// Classifies inventory records against configured thresholds
#[derive(Debug, Clone, Copy)]
pub struct StatusClassifier {
    thresholds: Thresholds,
}

impl StatusClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Health status for a quantity and expiration distance
    pub fn classify(&self, quantity: u32, days_until_expiration: i64) -> HealthStatus {
        if days_until_expiration < 0 {
            HealthStatus::Expired
        } else if days_until_expiration <= self.thresholds.expiration_proximity_days {
            HealthStatus::CriticalNearExpiration
        } else if self.thresholds.is_low_stock(quantity) {
            HealthStatus::LowStock
        } else {
            HealthStatus::HealthyStock
        }
    }

    /// Assess one record
    ///
    /// `sales` may hold the whole snapshot; only sales sharing the record's
    /// name feed the depletion estimate.
    pub fn assess(
        &self,
        record: &InventoryRecord,
        sales: &[SaleRecord],
        today: NaiveDate,
    ) -> Assessment {
        let days_until_expiration = record.days_until_expiration(today);
        let status = self.classify(record.quantity, days_until_expiration);

        let predicted_quantity_at_expiration = if status == HealthStatus::Expired {
            PredictedQuantity::Units(0)
        } else {
            let item_sales: Vec<&SaleRecord> =
                sales.iter().filter(|sale| sale.name == record.name).collect();
            predict_quantity_at_expiration(record.quantity, days_until_expiration, &item_sales)
        };

        Assessment {
            name: record.name.clone(),
            quantity: record.quantity,
            days_until_expiration,
            predicted_quantity_at_expiration,
            status,
        }
    }

    /// Assess every record of a snapshot, preserving order
    pub fn assess_all(
        &self,
        records: &[InventoryRecord],
        sales: &[SaleRecord],
        today: NaiveDate,
    ) -> Vec<Assessment> {
        records
            .iter()
            .map(|record| self.assess(record, sales, today))
            .collect()
    }
}

/// Average units sold per day across the item's sale dates
///
/// `None` when the sales cover fewer than two distinct calendar dates.
pub fn daily_sales_rate(sales: &[&SaleRecord]) -> Option<Decimal> {
    let dates: BTreeSet<NaiveDate> = sales.iter().map(|sale| sale.sale_date.date_naive()).collect();
    let (earliest, latest) = (dates.first()?, dates.last()?);
    let span_days = (*latest - *earliest).num_days();
    if span_days <= 0 {
        return None;
    }

    let sold: u64 = sales.iter().map(|sale| u64::from(sale.quantity)).sum();
    Some(Decimal::from(sold) / Decimal::from(span_days))
}

/// Stock left at expiration if sales continue at the historical rate
pub fn predict_quantity_at_expiration(
    quantity: u32,
    days_until_expiration: i64,
    sales: &[&SaleRecord],
) -> PredictedQuantity {
    let Some(rate) = daily_sales_rate(sales) else {
        return PredictedQuantity::NotApplicable;
    };

    let projected = Decimal::from(quantity) - rate * Decimal::from(days_until_expiration);
    let rounded = projected
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    // rate and days are non-negative here, so rounded lies in [0, quantity]
    PredictedQuantity::Units(rounded.to_u32().unwrap_or(quantity).min(quantity))
}
