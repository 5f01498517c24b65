//! Route definitions for the IntelliStock dashboard API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/inventory", inventory_routes())
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route("/shipments", get(handlers::shipments::list_shipments))
        .route("/trends/:name", get(handlers::trends::get_item_trends))
        .route("/chat", post(handlers::chat::send_message))
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::inventory::list_inventory))
        .route("/:name", get(handlers::inventory::get_item_details))
}
