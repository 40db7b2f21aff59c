//! Farm inspection dashboard
//!
//! CLI and HTTP front-ends over `farm-dashboard-common`.

pub mod browse;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod progress;
pub mod report;
pub mod server;
pub mod source;
