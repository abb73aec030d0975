//! Observability for the plan service
//!
//! Provides:
//! - Prometheus metrics (calculator latency, recommendation outcomes, catalog errors, contact intake)
//! - Structured JSON logging with tracing

use crate::models::{Recommendation, RecommendationRequest};
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for calculator latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    calculator_latency_seconds: Histogram,
    recommendations: IntCounterVec,
    overflows: IntCounterVec,
    invalid_requests: IntCounter,
    catalog_errors: IntCounter,
    contact_messages: IntCounter,
    contact_forward_failures: IntCounter,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            calculator_latency_seconds: register_histogram!(
                "hexacraft_calculator_latency_seconds",
                "Time spent computing a plan recommendation",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register calculator_latency_seconds"),

            recommendations: register_int_counter_vec!(
                "hexacraft_recommendations_total",
                "Plan recommendations served",
                &["tier", "profile"]
            )
            .expect("Failed to register recommendations_total"),

            overflows: register_int_counter_vec!(
                "hexacraft_recommendation_overflows_total",
                "Recommendations where no plan covered the requirement",
                &["tier"]
            )
            .expect("Failed to register recommendation_overflows_total"),

            invalid_requests: register_int_counter!(
                "hexacraft_invalid_requests_total",
                "Calculator requests rejected as invalid input"
            )
            .expect("Failed to register invalid_requests_total"),

            catalog_errors: register_int_counter!(
                "hexacraft_catalog_errors_total",
                "Failures loading or using the plan catalog"
            )
            .expect("Failed to register catalog_errors_total"),

            contact_messages: register_int_counter!(
                "hexacraft_contact_messages_total",
                "Contact messages accepted"
            )
            .expect("Failed to register contact_messages_total"),

            contact_forward_failures: register_int_counter!(
                "hexacraft_contact_forward_failures_total",
                "Contact messages that could not be forwarded"
            )
            .expect("Failed to register contact_forward_failures_total"),
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_calculator_latency(&self, duration_secs: f64) {
        self.inner().calculator_latency_seconds.observe(duration_secs);
    }

    /// Count a served recommendation, and its overflow if any
    pub fn record_recommendation(&self, recommendation: &Recommendation, profile: &str) {
        let tier = recommendation.plan_tier.as_str();
        self.inner()
            .recommendations
            .with_label_values(&[tier, profile])
            .inc();
        if recommendation.is_overflow() {
            self.inner().overflows.with_label_values(&[tier]).inc();
        }
    }

    pub fn inc_invalid_requests(&self) {
        self.inner().invalid_requests.inc();
    }

    pub fn inc_catalog_errors(&self) {
        self.inner().catalog_errors.inc();
    }

    pub fn inc_contact_messages(&self) {
        self.inner().contact_messages.inc();
    }

    pub fn inc_contact_forward_failures(&self) {
        self.inner().contact_forward_failures.inc();
    }
}

/// Structured logger for service events
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// Log a served recommendation
    pub fn log_recommendation(
        &self,
        request: &RecommendationRequest,
        recommendation: &Recommendation,
    ) {
        match &recommendation.overflow_warning {
            None => {
                info!(
                    event = "recommendation_generated",
                    service = %self.service_name,
                    players = request.player_count(),
                    profile = %request.workload_profile(),
                    tier = %request.hardware_tier(),
                    ram_gb = recommendation.recommended_ram_gb,
                    cpu_pct = recommendation.required_cpu_pct,
                    plan = %recommendation.suggested_plan.name,
                    price = recommendation.price,
                    "Generated plan recommendation"
                );
            }
            Some(warning) => {
                warn!(
                    event = "plan_overflow",
                    service = %self.service_name,
                    players = request.player_count(),
                    profile = %request.workload_profile(),
                    tier = %request.hardware_tier(),
                    ram_gb = recommendation.recommended_ram_gb,
                    cpu_pct = recommendation.required_cpu_pct,
                    nearest_plan = %recommendation.suggested_plan.name,
                    warning = %warning,
                    "Requirement exceeds largest plan in tier"
                );
            }
        }
    }

    /// Log a rejected calculator request
    pub fn log_invalid_request(&self, reason: &str) {
        info!(
            event = "invalid_request",
            service = %self.service_name,
            reason = %reason,
            "Rejected calculator request"
        );
    }

    /// Log a catalog load or lookup failure
    pub fn log_catalog_error(&self, source: &str, error: &str) {
        warn!(
            event = "catalog_unavailable",
            service = %self.service_name,
            source = %source,
            error = %error,
            "Plan catalog unavailable"
        );
    }

    /// Log an accepted contact message. The body is not logged.
    pub fn log_contact_received(&self, id: &str, subject: &str, forwarded: bool) {
        info!(
            event = "contact_received",
            service = %self.service_name,
            id = %id,
            subject = %subject,
            forwarded = forwarded,
            "Contact message received"
        );
    }

    pub fn log_startup(&self, version: &str, catalog_source: &str) {
        info!(
            event = "service_started",
            service = %self.service_name,
            version = %version,
            catalog_source = %catalog_source,
            "Plan service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service_name,
            reason = %reason,
            "Plan service shutting down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanCatalog;
    use crate::recommender::recommend;

    #[test]
    fn test_service_metrics_record() {
        let metrics = ServiceMetrics::new();
        let catalog = PlanCatalog::builtin().to_plans();
        let request = RecommendationRequest::parse(500, "modded", "budget").unwrap();
        let recommendation = recommend(&request, &catalog).unwrap();

        metrics.observe_calculator_latency(0.0001);
        metrics.record_recommendation(&recommendation, "modded");
        metrics.inc_invalid_requests();
        metrics.inc_catalog_errors();
        metrics.inc_contact_messages();
        metrics.inc_contact_forward_failures();

        let families = prometheus::gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "hexacraft_recommendation_overflows_total"));
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("hexacraft-api");
        assert_eq!(logger.service_name, "hexacraft-api");
    }
}
