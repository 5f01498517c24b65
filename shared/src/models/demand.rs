//! Demand series and external demand signals

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observation of a demand series (search interest, predicted units, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemandPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A named demand series, e.g. one search-interest feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemandSeries {
    pub source: String,
    pub points: Vec<DemandPoint>,
}

impl DemandSeries {
    /// Observed values in date order
    pub fn values(&self) -> Vec<f64> {
        series_values(&self.points)
    }
}

/// Reading of a demand source's percent trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignalOutlook {
    /// +10% or more
    Positive,
    Neutral,
    /// -10% or less
    Negative,
}

impl SignalOutlook {
    pub fn from_trend(trend_percent: f64) -> Self {
        if trend_percent >= 10.0 {
            SignalOutlook::Positive
        } else if trend_percent <= -10.0 {
            SignalOutlook::Negative
        } else {
            SignalOutlook::Neutral
        }
    }
}

impl std::fmt::Display for SignalOutlook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalOutlook::Positive => write!(f, "Growing demand"),
            SignalOutlook::Neutral => write!(f, "Stable demand"),
            SignalOutlook::Negative => write!(f, "Cooling demand"),
        }
    }
}

/// Trend reported by a single demand source (Google Trends, social, events)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemandSignal {
    pub source: String,
    pub trend_percent: f64,
    pub outlook: SignalOutlook,
}

impl DemandSignal {
    pub fn new(source: impl Into<String>, trend_percent: f64) -> Self {
        Self {
            source: source.into(),
            trend_percent,
            outlook: SignalOutlook::from_trend(trend_percent),
        }
    }
}

/// Values of a demand series in date order
pub fn series_values(points: &[DemandPoint]) -> Vec<f64> {
    let mut ordered: Vec<&DemandPoint> = points.iter().collect();
    ordered.sort_by_key(|point| point.date);
    ordered.into_iter().map(|point| point.value).collect()
}
