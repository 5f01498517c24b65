//! HTTP request handlers

pub mod chat;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod shipments;
pub mod trends;
