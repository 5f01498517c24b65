//! HTTP handlers for the dashboard summary

use axum::{extract::State, Json};
use shared::DashboardSummary;

use crate::error::AppResult;
use crate::services::DashboardService;
use crate::AppState;

/// Get the dashboard summary cards
pub async fn get_summary(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let now = state.clock.now();
    let service = DashboardService::new(state.data_source.clone(), state.thresholds);
    let summary = service.summary(now).await?;
    Ok(Json(summary))
}
