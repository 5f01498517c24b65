//! Demand trend service

use std::sync::Arc;

use serde::Serialize;
use shared::{demand_signal, trend, DemandPoint, DemandSeries, DemandSignal, Trend};

use crate::error::{AppError, AppResult};
use crate::external::DataSource;

#[derive(Clone)]
pub struct TrendService {
    source: Arc<dyn DataSource>,
}

/// Demand chart and per-source signals for one item
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub item: String,
    /// Primary series in date order
    pub points: Vec<DemandPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Whether the change is large enough for the trend banner
    pub show_banner: bool,
    pub signals: Vec<DemandSignal>,
}

impl TrendService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub async fn item_trends(&self, item: &str) -> AppResult<TrendReport> {
        let series = self.source.fetch_demand(item).await?;
        let primary = series
            .first()
            .ok_or_else(|| AppError::NotFound(format!("Demand data for {}", item)))?;

        let trend = trend(&primary.values()).ok();
        Ok(TrendReport {
            item: item.to_string(),
            points: sorted_points(primary),
            show_banner: trend.is_some_and(|trend| trend.shows_banner()),
            trend,
            signals: signals(&series),
        })
    }
}

fn sorted_points(series: &DemandSeries) -> Vec<DemandPoint> {
    let mut points = series.points.clone();
    points.sort_by_key(|point| point.date);
    points
}

/// Signals of every source with a defined trend
fn signals(series: &[DemandSeries]) -> Vec<DemandSignal> {
    series
        .iter()
        .filter_map(|series| match demand_signal(series) {
            Ok(signal) => Some(signal),
            Err(e) => {
                tracing::debug!(source = %series.source, "Skipping demand source: {}", e);
                None
            }
        })
        .collect()
}
