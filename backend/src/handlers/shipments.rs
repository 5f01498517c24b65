//! HTTP handlers for shipments and reorders

use axum::{extract::State, Json};
use shared::ShipmentOrder;

use crate::error::AppResult;
use crate::AppState;

/// List shipment orders as reported upstream
pub async fn list_shipments(State(state): State<AppState>) -> AppResult<Json<Vec<ShipmentOrder>>> {
    let orders = state.data_source.fetch_orders().await?;
    Ok(Json(orders))
}
