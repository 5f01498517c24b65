//! IntelliStock - Backend Server
//!
//! Inventory health dashboard for grocery stores: stock and expiration
//! alerts, weekly sales figures, demand trends and a chat assistant.

use axum::{routing::get, Router};
use shared::Thresholds;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod clock;
mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use crate::config::Config;

use crate::clock::Clock;
use crate::config::{DataSourceConfig, DataSourceKind};
use crate::error::{AppError, AppResult};
use crate::external::{ChatWebhookClient, DataSource, FixtureDataSource, Fixtures, HttpDataSource};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data_source: Arc<dyn DataSource>,
    pub chat: Option<ChatWebhookClient>,
    pub thresholds: Thresholds,
    pub clock: Clock,
}

impl AppState {
    /// Build the state described by the configuration
    pub fn from_config(config: Config) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.data_source.timeout_secs);

        let chat = config
            .chat
            .webhook_url
            .as_deref()
            .map(|url| ChatWebhookClient::new(url, timeout))
            .transpose()?;

        let clock = match config.clock.fixed_now.as_deref() {
            Some(raw) => Clock::Fixed(shared::parse_timestamp("clock.fixed_now", raw)?),
            None => Clock::System,
        };

        Ok(Self {
            data_source: build_data_source(&config.data_source)?,
            chat,
            thresholds: config.thresholds.to_thresholds(),
            clock,
            config: Arc::new(config),
        })
    }
}

fn build_data_source(config: &DataSourceConfig) -> AppResult<Arc<dyn DataSource>> {
    match config.kind {
        DataSourceKind::Http => {
            tracing::info!("Using inventory API at {}", config.base_url);
            let source =
                HttpDataSource::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
            Ok(Arc::new(source))
        }
        DataSourceKind::Fixture => {
            let fixtures = match &config.fixture_path {
                Some(path) => {
                    tracing::info!("Loading fixtures from {}", path);
                    Fixtures::from_file(path)?
                }
                None => {
                    tracing::info!("Using built-in sample fixtures");
                    Fixtures::sample()
                }
            };
            Ok(Arc::new(FixtureDataSource::new(fixtures)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intellistock_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting IntelliStock Server");
    tracing::info!("Environment: {}", config.environment);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| AppError::Configuration(format!("Invalid server.host: {}", e)))?;
    let addr = SocketAddr::from((host, config.server.port));

    // Create application state
    let state = AppState::from_config(config)?;
    if state.chat.is_none() {
        tracing::warn!("chat.webhook_url is not set; chat requests will be rejected");
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "IntelliStock Inventory API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use crate::config::{ChatConfig, ClockConfig, ServerConfig, ThresholdConfig};
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            data_source: DataSourceConfig {
                kind: DataSourceKind::Fixture,
                base_url: "http://localhost:5000".to_string(),
                fixture_path: None,
                timeout_secs: 5,
            },
            thresholds: ThresholdConfig {
                low_stock: 10,
                expiration_proximity_days: 3,
            },
            chat: ChatConfig::default(),
            clock: ClockConfig {
                fixed_now: Some("2024-10-15T12:00:00Z".to_string()),
            },
        }
    }

    fn app() -> Router {
        create_app(AppState::from_config(test_config()).unwrap())
    }

    async fn get(uri: &str) -> (StatusCode, axum::body::Bytes) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, to_bytes(response.into_body(), usize::MAX).await.unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_state_uses_fixed_clock() {
        let state = AppState::from_config(test_config()).unwrap();
        assert_eq!(
            state.clock.now(),
            Utc.with_ymd_and_hms(2024, 10, 15, 12, 0, 0).unwrap()
        );
        assert_eq!(state.data_source.name(), "fixture");
    }

    #[test]
    fn test_invalid_fixed_clock_rejected() {
        let mut config = test_config();
        config.clock.fixed_now = Some("yesterday".to_string());
        assert!(matches!(
            AppState::from_config(config),
            Err(AppError::DataFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["data_source"], "fixture");
        assert_eq!(body["environment"], "test");
    }

    #[tokio::test]
    async fn test_dashboard_summary() {
        let (status, body) = get_json("/api/v1/dashboard/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_items"], 4);
        assert_eq!(body["low_stock_count"], 1);
        assert_eq!(body["weekly_sales"], "271.14");
        assert_eq!(body["pending_orders"], 2);
        assert_eq!(body["trend"]["direction"], "up");
    }

    #[tokio::test]
    async fn test_inventory_search() {
        let (status, body) = get_json("/api/v1/inventory?q=banana").await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Organic Bananas");
        assert_eq!(items[0]["assessment"]["status"], "healthy_stock");
        assert_eq!(items[0]["assessment"]["predicted_quantity_at_expiration"], 25);
    }

    #[tokio::test]
    async fn test_inventory_csv_export() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/inventory?format=csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(csv.lines().count(), 5);
    }

    #[tokio::test]
    async fn test_item_details_not_found() {
        let (status, body) = get_json("/api/v1/inventory/Caviar").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_item_details() {
        let (status, body) = get_json("/api/v1/inventory/Whole%20Milk").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assessment"]["status"], "critical_near_expiration");
        assert_eq!(body["metrics"]["total_quantity"], 12);
    }

    #[tokio::test]
    async fn test_shipments() {
        let (status, body) = get_json("/api/v1/shipments").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_trends() {
        let (status, body) = get_json("/api/v1/trends/Organic%20Bananas").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["signals"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_chat_without_webhook() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"message": "Which items expire soon?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
