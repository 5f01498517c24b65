//! Domain models for the IntelliStock dashboard

mod assessment;
mod dashboard;
mod demand;
mod inventory;
mod shipment;

pub use assessment::*;
pub use dashboard::*;
pub use demand::*;
pub use inventory::*;
pub use shipment::*;
