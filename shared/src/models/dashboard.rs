//! Dashboard summary figures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of change between the first and last observation of a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
        }
    }
}

/// Percent change over an ordered series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Trend {
    /// Magnitude of the change, in percent
    pub percent_change: f64,
    pub direction: TrendDirection,
}

impl Trend {
    /// Smallest change, in percent, worth calling out in the trend banner
    pub const BANNER_THRESHOLD_PERCENT: f64 = 5.0;

    pub fn shows_banner(&self) -> bool {
        self.percent_change >= Self::BANNER_THRESHOLD_PERCENT
    }
}

/// Summary cards shown at the top of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub low_stock_count: usize,
    /// Revenue over the trailing seven days
    pub weekly_sales: Decimal,
    /// Absent when the trend is undefined; no banner is shown then
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trend: Option<Trend>,
    pub pending_orders: usize,
}
