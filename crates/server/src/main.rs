//! hexacraft-api - plan catalog and calculator service
//!
//! Serves the pricing pages' data: plans, plan recommendations, FAQ
//! entries and contact-form intake.

use anyhow::Result;
use hexacraft_api::{api::AppState, config::ServiceConfig, forward::ContactForwarder};
use planner_lib::{
    catalog::create_source,
    contact::ContactInbox,
    health::HealthRegistry,
    observability::{ServiceMetrics, StructuredLogger},
    Recommender,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting hexacraft-api");

    let config = ServiceConfig::load()?;
    info!(port = config.api_port, service = %config.service_name, "Service configured");

    let health_registry = HealthRegistry::new();

    let metrics = ServiceMetrics::new();
    let logger = StructuredLogger::new(&config.service_name);

    let catalog = create_source(config.catalog_path.as_deref());
    let catalog_source = catalog.describe();
    let recommender = Recommender::with_config(config.sizing.clone());

    let mut state = AppState::new(
        health_registry.clone(),
        metrics,
        logger.clone(),
        catalog,
        recommender,
    )
    .with_inbox(ContactInbox::bounded(config.contact_max_records))
    .with_cors_origins(config.cors_origin_list());

    if let Some(url) = &config.contact_webhook_url {
        let forwarder = ContactForwarder::new(url)?;
        info!(webhook = %forwarder.webhook_url(), "Forwarding contact messages");
        state = state.with_forwarder(forwarder);
    }

    logger.log_startup(SERVICE_VERSION, &catalog_source);
    health_registry.set_ready(true).await;

    let shutdown_logger = logger.clone();
    let shutdown = async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_logger.log_shutdown("SIGINT received");
        }
    };

    hexacraft_api::serve(config.api_port, Arc::new(state), shutdown).await?;
    info!("Shut down");

    Ok(())
}
