//! Upstream inventory REST API client
//!
//! Reads inventory, sales and shipment snapshots plus Google Trends interest
//! for a single item.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{DemandPoint, DemandSeries, OrdersEnvelope, RawInventoryRecord, RawSaleRecord, ShipmentOrder};

use super::data_source::DataSource;
use crate::error::{AppError, AppResult};

/// Source label of the search-interest series
pub const GOOGLE_TRENDS_SOURCE: &str = "Google Trends";

/// Inventory API client
#[derive(Clone)]
pub struct HttpDataSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TrendsRequest<'a> {
    name: &'a str,
}

/// `{"success": true, "data": {"<item>": [{"date", "value"}]}}`
#[derive(Debug, Deserialize)]
struct TrendsResponse {
    success: bool,
    #[serde(default)]
    data: HashMap<String, Vec<DemandPoint>>,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request to {} failed: {}", path, e)))?;

        Self::parse_response(path, response).await
    }

    async fn parse_response<T: DeserializeOwned>(path: &str, response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "{} returned {} - {}",
                path, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse {} response: {}", path, e)))
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_inventory(&self) -> AppResult<Vec<RawInventoryRecord>> {
        self.get_json("inventory").await
    }

    async fn fetch_sales(&self) -> AppResult<Vec<RawSaleRecord>> {
        self.get_json("sales").await
    }

    async fn fetch_orders(&self) -> AppResult<Vec<ShipmentOrder>> {
        let envelope: OrdersEnvelope = self.get_json("orders").await?;
        Ok(envelope.orders)
    }

    async fn fetch_demand(&self, item_name: &str) -> AppResult<Vec<DemandSeries>> {
        let path = "getGoogleTrends";
        let response = self
            .client
            .post(self.url(path))
            .json(&TrendsRequest { name: item_name })
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request to {} failed: {}", path, e)))?;

        let body: TrendsResponse = Self::parse_response(path, response).await?;
        trends_to_series(body, item_name)
    }
}

fn trends_to_series(mut body: TrendsResponse, item_name: &str) -> AppResult<Vec<DemandSeries>> {
    if !body.success {
        return Err(AppError::Upstream(format!(
            "Google Trends lookup for {} was unsuccessful",
            item_name
        )));
    }

    let points = body.data.remove(item_name).ok_or_else(|| {
        AppError::Upstream(format!("Google Trends returned no data for {}", item_name))
    })?;

    Ok(vec![DemandSeries {
        source: GOOGLE_TRENDS_SOURCE.to_string(),
        points,
    }])
}
