//! Business logic services for the IntelliStock dashboard

pub mod chat;
pub mod dashboard;
pub mod inventory;
pub mod trends;

pub use chat::ChatService;
pub use dashboard::DashboardService;
pub use inventory::InventoryService;
pub use trends::TrendService;
