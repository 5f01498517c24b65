//! External API integrations

pub mod chat_webhook;
pub mod data_source;
pub mod inventory_api;

pub use chat_webhook::ChatWebhookClient;
pub use data_source::{DataSource, FixtureDataSource, Fixtures};
pub use inventory_api::HttpDataSource;
