//! HTTP handlers for demand trends

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::trends::TrendReport;
use crate::services::TrendService;
use crate::AppState;

/// Get the demand chart and signals for one item
pub async fn get_item_trends(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<TrendReport>> {
    let service = TrendService::new(state.data_source.clone());
    let report = service.item_trends(&name).await?;
    Ok(Json(report))
}
