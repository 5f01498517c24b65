//! Shared inventory core for the IntelliStock dashboard
//!
//! Pure computation over already-fetched snapshots: record parsing, per-item
//! health assessment and dashboard aggregates. Used by the backend service and,
//! via WASM, by the browser dashboard.

pub mod classifier;
pub mod error;
pub mod models;
pub mod sales;
pub mod search;
pub mod stats;
pub mod types;
pub mod validation;

pub use classifier::*;
pub use error::*;
pub use models::*;
pub use sales::*;
pub use search::*;
pub use stats::*;
pub use types::*;
pub use validation::*;
