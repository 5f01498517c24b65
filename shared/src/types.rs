//! Common types used across the platform

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Alerting thresholds applied when classifying stock
///
/// Callers supply both values; dashboard views have used both 10 and 20 units
/// as the low-stock line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thresholds {
    /// Quantity strictly below which an item is low on stock
    pub low_stock: u32,
    /// Items expiring within this many days are critical
    pub expiration_proximity_days: i64,
}

impl Thresholds {
    pub fn new(low_stock: u32, expiration_proximity_days: i64) -> Self {
        Self {
            low_stock,
            expiration_proximity_days,
        }
    }

    pub fn is_low_stock(&self, quantity: u32) -> bool {
        quantity < self.low_stock
    }
}

/// Closed time interval `[start, end]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the `days` days that end at `now`
    pub fn trailing_days(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now,
        }
    }

    /// Both bounds are inclusive
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}
