//! HexaCraft plan service HTTP layer
//!
//! Exposes the plan catalog, the plan calculator, the FAQ and the
//! contact intake over axum, plus health and Prometheus endpoints.

pub mod api;
pub mod config;
pub mod forward;

pub use api::{create_router, serve, AppState};
pub use config::ServiceConfig;
