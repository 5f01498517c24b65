//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::inventory::{AssessmentRow, ItemDetails};
use crate::services::InventoryService;
use crate::AppState;

#[derive(Deserialize)]
pub struct InventoryQuery {
    /// Case-insensitive name filter
    pub q: Option<String>,
    pub format: Option<String>, // "json" or "csv"
}

/// List assessed inventory items
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();
    let service = InventoryService::new(state.data_source.clone(), state.thresholds);
    let items = service
        .list_items(query.q.as_deref().unwrap_or_default(), today)
        .await?;

    if query.format.as_deref() == Some("csv") {
        let rows: Vec<AssessmentRow> = items.iter().map(AssessmentRow::from).collect();
        let csv = InventoryService::export_to_csv(&rows)?;
        Ok((
            [(header::CONTENT_TYPE, "text/csv"), (header::CONTENT_DISPOSITION, "attachment; filename=\"inventory.csv\"")],
            csv,
        ).into_response())
    } else {
        Ok(Json(items).into_response())
    }
}

/// Get assessment and sales details for one item
pub async fn get_item_details(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ItemDetails>> {
    let today = state.clock.today();
    let service = InventoryService::new(state.data_source.clone(), state.thresholds);
    let details = service.item_details(&name, today).await?;
    Ok(Json(details))
}
