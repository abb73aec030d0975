//! Core library for the HexaCraft plan service
//!
//! This crate provides:
//! - The plan recommendation engine
//! - The plan catalog and its sources
//! - FAQ content and contact-message intake
//! - Health checks and observability

pub mod catalog;
pub mod contact;
pub mod error;
pub mod faq;
pub mod health;
pub mod models;
pub mod observability;
pub mod recommender;

pub use catalog::{CatalogSource, PlanCatalog};
pub use error::RecommendError;
pub use health::{
    Component, ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
pub use recommender::{recommend, Recommender, SizingConfig};
