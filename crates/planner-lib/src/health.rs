//! Health tracking for the plan service
//!
//! Each service part keeps a last-known status. `/healthz` reports the
//! worst of them; `/readyz` only cares whether plans can be served, so
//! a flaky contact webhook never takes the calculator out of rotation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Parts of the service that report health
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    /// Plan catalog source
    Catalog,
    /// Recommendation engine against the loaded catalog
    Calculator,
    /// Contact intake and forwarding
    ContactInbox,
}

impl Component {
    pub const ALL: [Component; 3] = [
        Component::Catalog,
        Component::Calculator,
        Component::ContactInbox,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Catalog => "catalog",
            Component::Calculator => "calculator",
            Component::ContactInbox => "contact_inbox",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered from best to worst, so the overall status is the maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Unix seconds of the last status change
    pub last_check_timestamp: i64,
}

impl ComponentHealth {
    pub fn new(status: ComponentStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// `/healthz` body; components keyed by name, in name order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub components: BTreeMap<String, ComponentHealth>,
}

/// `/readyz` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug)]
struct RegistryState {
    components: BTreeMap<Component, ComponentHealth>,
    started: bool,
}

/// Shared, cloneable view of component health
#[derive(Debug, Clone)]
pub struct HealthRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthRegistry {
    /// Every component starts healthy; the service starts not ready
    pub fn new() -> Self {
        let components = Component::ALL
            .into_iter()
            .map(|c| (c, ComponentHealth::new(ComponentStatus::Healthy, None)))
            .collect();

        Self {
            state: Arc::new(RwLock::new(RegistryState {
                components,
                started: false,
            })),
        }
    }

    async fn record(&self, component: Component, status: ComponentStatus, message: Option<String>) {
        let mut state = self.state.write().await;
        // Keep the original timestamp while nothing changes
        if let Some(current) = state.components.get(&component) {
            if current.status == status && current.message == message {
                return;
            }
        }
        state
            .components
            .insert(component, ComponentHealth::new(status, message));
    }

    pub async fn set_healthy(&self, component: Component) {
        self.record(component, ComponentStatus::Healthy, None).await;
    }

    pub async fn set_degraded(&self, component: Component, message: impl Into<String>) {
        self.record(component, ComponentStatus::Degraded, Some(message.into()))
            .await;
    }

    pub async fn set_unhealthy(&self, component: Component, message: impl Into<String>) {
        self.record(component, ComponentStatus::Unhealthy, Some(message.into()))
            .await;
    }

    /// Mark startup as finished (or the service as draining)
    pub async fn set_ready(&self, ready: bool) {
        self.state.write().await.started = ready;
    }

    pub async fn status_of(&self, component: Component) -> ComponentStatus {
        self.state
            .read()
            .await
            .components
            .get(&component)
            .map(|h| h.status)
            .unwrap_or(ComponentStatus::Healthy)
    }

    pub async fn health(&self) -> HealthResponse {
        let state = self.state.read().await;
        let status = state
            .components
            .values()
            .map(|h| h.status)
            .max()
            .unwrap_or(ComponentStatus::Healthy);

        HealthResponse {
            status,
            components: state
                .components
                .iter()
                .map(|(c, h)| (c.as_str().to_string(), h.clone()))
                .collect(),
        }
    }

    /// Ready once started and while the catalog can be loaded
    pub async fn readiness(&self) -> ReadinessResponse {
        let state = self.state.read().await;

        if !state.started {
            return ReadinessResponse {
                ready: false,
                reason: Some("Service not yet initialized".to_string()),
            };
        }

        match state.components.get(&Component::Catalog) {
            Some(catalog) if catalog.status == ComponentStatus::Unhealthy => ReadinessResponse {
                ready: false,
                reason: Some(format!(
                    "Plan catalog unavailable: {}",
                    catalog.message.as_deref().unwrap_or("unknown error")
                )),
            },
            _ => ReadinessResponse {
                ready: true,
                reason: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_components_start_healthy() {
        let registry = HealthRegistry::new();
        let health = registry.health().await;

        assert_eq!(health.status, ComponentStatus::Healthy);
        let names: Vec<_> = health.components.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["calculator", "catalog", "contact_inbox"]);
    }

    #[tokio::test]
    async fn test_overall_status_is_worst_component() {
        let registry = HealthRegistry::new();

        registry
            .set_degraded(Component::ContactInbox, "Contact webhook unreachable")
            .await;
        assert_eq!(registry.health().await.status, ComponentStatus::Degraded);

        registry
            .set_unhealthy(Component::Catalog, "Catalog file unreadable")
            .await;
        assert_eq!(registry.health().await.status, ComponentStatus::Unhealthy);

        registry.set_healthy(Component::Catalog).await;
        assert_eq!(registry.health().await.status, ComponentStatus::Degraded);
    }

    #[tokio::test]
    async fn test_recovery_clears_message() {
        let registry = HealthRegistry::new();
        registry
            .set_degraded(Component::Calculator, "No plans for the budget tier")
            .await;
        registry.set_healthy(Component::Calculator).await;

        let health = registry.health().await;
        assert_eq!(health.components["calculator"].status, ComponentStatus::Healthy);
        assert!(health.components["calculator"].message.is_none());
        assert_eq!(
            registry.status_of(Component::Calculator).await,
            ComponentStatus::Healthy
        );
    }

    #[tokio::test]
    async fn test_not_ready_until_started() {
        let registry = HealthRegistry::new();
        let readiness = registry.readiness().await;

        assert!(!readiness.ready);
        assert_eq!(
            readiness.reason.as_deref(),
            Some("Service not yet initialized")
        );

        registry.set_ready(true).await;
        assert!(registry.readiness().await.ready);
    }

    #[tokio::test]
    async fn test_readiness_follows_catalog_only() {
        let registry = HealthRegistry::new();
        registry.set_ready(true).await;

        registry
            .set_unhealthy(Component::ContactInbox, "Contact webhook rejected")
            .await;
        registry
            .set_degraded(Component::Calculator, "No plans for the budget tier")
            .await;
        assert!(registry.readiness().await.ready);

        registry
            .set_unhealthy(Component::Catalog, "Failed to read catalog file")
            .await;
        let readiness = registry.readiness().await;
        assert!(!readiness.ready);
        assert_eq!(
            readiness.reason.as_deref(),
            Some("Plan catalog unavailable: Failed to read catalog file")
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ComponentStatus::Degraded).unwrap(),
            "degraded"
        );
        assert_eq!(Component::ContactInbox.to_string(), "contact_inbox");
    }
}
