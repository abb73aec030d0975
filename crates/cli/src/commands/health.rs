//! Service health command

use anyhow::Result;
use colored::Colorize;
use planner_lib::{ComponentStatus, HealthResponse, ReadinessResponse};
use serde::Serialize;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_status, print_json, OutputFormat};

/// Row for component health table
#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Serialize)]
struct HealthReport {
    health: HealthResponse,
    readiness: ReadinessResponse,
}

fn status_str(status: ComponentStatus) -> &'static str {
    match status {
        ComponentStatus::Healthy => "healthy",
        ComponentStatus::Degraded => "degraded",
        ComponentStatus::Unhealthy => "unhealthy",
    }
}

fn component_rows(health: &HealthResponse) -> Vec<ComponentRow> {
    health
        .components
        .iter()
        .map(|(name, c)| ComponentRow {
            name: name.clone(),
            status: color_status(status_str(c.status)),
            message: c.message.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// Show service health and readiness
pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let (_, health): (u16, HealthResponse) = client.probe("healthz").await?;
    let (_, readiness): (u16, ReadinessResponse) = client.probe("readyz").await?;

    match format {
        OutputFormat::Json => print_json(&HealthReport { health, readiness })?,
        OutputFormat::Table => {
            println!("{}", "Service Health".bold());
            println!("{}", "=".repeat(50));
            println!("Status:    {}", color_status(status_str(health.status)));
            let ready = if readiness.ready { "ready" } else { "not ready" };
            println!("Readiness: {}", color_status(ready));
            if let Some(reason) = &readiness.reason {
                println!("Reason:    {}", reason.dimmed());
            }
            println!();

            let table = tabled::Table::new(component_rows(&health))
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_lib::ComponentHealth;
    use std::collections::BTreeMap;

    #[test]
    fn test_component_rows_in_name_order() {
        let mut components = BTreeMap::new();
        components.insert(
            "contact_inbox".to_string(),
            ComponentHealth::new(ComponentStatus::Healthy, None),
        );
        components.insert(
            "catalog".to_string(),
            ComponentHealth::new(
                ComponentStatus::Degraded,
                Some("no plans available for the budget tier".to_string()),
            ),
        );
        let health = HealthResponse {
            status: ComponentStatus::Degraded,
            components,
        };

        let rows = component_rows(&health);
        assert_eq!(rows[0].name, "catalog");
        assert_eq!(rows[0].message, "no plans available for the budget tier");
        assert_eq!(rows[1].name, "contact_inbox");
        assert_eq!(rows[1].message, "-");
    }
}
