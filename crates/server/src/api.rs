//! HTTP API: plans, calculator, FAQ, contact, health and metrics

use crate::forward::ContactForwarder;
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use planner_lib::{
    catalog::{CatalogSource, PlanCatalog},
    contact::{ContactError, ContactForm, ContactInbox, ContactRecord},
    faq::{default_faqs, FaqEntry},
    health::{Component, ComponentStatus, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    Recommendation, RecommendError, RecommendationRequest, Recommender,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
    pub catalog: Arc<dyn CatalogSource>,
    pub recommender: Recommender,
    pub inbox: ContactInbox,
    pub forwarder: Option<ContactForwarder>,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(
        health_registry: HealthRegistry,
        metrics: ServiceMetrics,
        logger: StructuredLogger,
        catalog: Arc<dyn CatalogSource>,
        recommender: Recommender,
    ) -> Self {
        Self {
            health_registry,
            metrics,
            logger,
            catalog,
            recommender,
            inbox: ContactInbox::new(),
            forwarder: None,
            cors_origins: vec!["*".to_string()],
        }
    }

    pub fn with_forwarder(mut self, forwarder: ContactForwarder) -> Self {
        self.forwarder = Some(forwarder);
        self
    }

    pub fn with_inbox(mut self, inbox: ContactInbox) -> Self {
        self.inbox = inbox;
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Load the catalog, keeping the catalog component's health current
    async fn load_catalog(&self) -> Result<PlanCatalog, ApiError> {
        match self.catalog.load().await {
            Ok(catalog) => {
                self.health_registry.set_healthy(Component::Catalog).await;
                Ok(catalog)
            }
            Err(err) => {
                let message = format!("{:#}", err);
                self.metrics.inc_catalog_errors();
                self.logger
                    .log_catalog_error(&self.catalog.describe(), &message);
                self.health_registry
                    .set_unhealthy(Component::Catalog, message.clone())
                    .await;
                Err(ApiError::CatalogLoad(message))
            }
        }
    }
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error("invalid request body: {0}")]
    BadBody(String),

    #[error("plans are temporarily unavailable")]
    CatalogLoad(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details) = match &self {
            ApiError::Recommend(err @ RecommendError::InvalidInput(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.code(), None)
            }
            ApiError::Recommend(err @ RecommendError::CatalogUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.code(), None)
            }
            ApiError::Contact(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_contact", None),
            ApiError::BadBody(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input", None),
            ApiError::CatalogLoad(cause) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "catalog_unavailable",
                Some(cause.clone()),
            ),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// `POST /api/calculator` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorRequest {
    pub players: serde_json::Number,
    pub server_type: String,
    pub performance_level: String,
}

impl CalculatorRequest {
    /// Validate into an engine request
    pub fn to_request(&self) -> Result<RecommendationRequest, RecommendError> {
        let players = whole_number(&self.players).ok_or_else(|| {
            RecommendError::InvalidInput(format!(
                "player count must be a positive whole number, got {}",
                self.players
            ))
        })?;

        RecommendationRequest::parse(players, &self.server_type, &self.performance_level)
    }
}

/// Integral JSON numbers as i64; `10.0` counts, `10.5` does not
fn whole_number(number: &serde_json::Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    if number.is_u64() {
        // Larger than i64::MAX
        return None;
    }
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// `POST /api/calculator` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorResponse {
    pub recommended_ram: u64,
    pub recommended_cpu: u64,
    pub required_cpu: u64,
    pub suggested_plan: String,
    pub plan_tier: String,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_warning: Option<String>,
}

impl From<Recommendation> for CalculatorResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            recommended_ram: rec.recommended_ram_gb,
            recommended_cpu: rec.recommended_cpu_pct,
            required_cpu: rec.required_cpu_pct,
            suggested_plan: rec.suggested_plan.name,
            plan_tier: rec.plan_tier.to_string(),
            price: rec.price,
            upgrade_warning: rec.overflow_warning,
        }
    }
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "HexaCraft API" }))
}

async fn plans(State(state): State<Arc<AppState>>) -> Result<Json<PlanCatalog>, ApiError> {
    Ok(Json(state.load_catalog().await?))
}

async fn calculator(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculatorRequest>, JsonRejection>,
) -> Result<Json<CalculatorResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        state.metrics.inc_invalid_requests();
        state.logger.log_invalid_request(&rejection.body_text());
        ApiError::BadBody(rejection.body_text())
    })?;

    let request = body.to_request().map_err(|err| {
        state.metrics.inc_invalid_requests();
        state.logger.log_invalid_request(&err.to_string());
        ApiError::from(err)
    })?;

    let catalog = state.load_catalog().await?.to_plans();

    let started = Instant::now();
    let result = state.recommender.recommend(&request, &catalog);
    state
        .metrics
        .observe_calculator_latency(started.elapsed().as_secs_f64());

    match result {
        Ok(recommendation) => {
            state
                .metrics
                .record_recommendation(&recommendation, request.workload_profile().as_str());
            state.logger.log_recommendation(&request, &recommendation);
            state.health_registry.set_healthy(Component::Calculator).await;
            Ok(Json(recommendation.into()))
        }
        Err(err) => {
            if let RecommendError::CatalogUnavailable(tier) = &err {
                state.metrics.inc_catalog_errors();
                state
                    .logger
                    .log_catalog_error(&state.catalog.describe(), &err.to_string());
                state
                    .health_registry
                    .set_degraded(Component::Calculator, format!("No plans for the {} tier", tier))
                    .await;
            }
            Err(err.into())
        }
    }
}

async fn faqs() -> Json<Vec<FaqEntry>> {
    Json(default_faqs())
}

async fn contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactRecord>, ApiError> {
    let Json(form) = payload.map_err(|rejection| {
        state.metrics.inc_invalid_requests();
        state.logger.log_invalid_request(&rejection.body_text());
        ApiError::BadBody(rejection.body_text())
    })?;

    let mut record = state.inbox.submit(form).await.map_err(|err| {
        state.metrics.inc_invalid_requests();
        state.logger.log_invalid_request(&err.to_string());
        ApiError::from(err)
    })?;
    state.metrics.inc_contact_messages();

    if let Some(forwarder) = &state.forwarder {
        match forwarder.forward(&record).await {
            Ok(()) => {
                state.inbox.mark_forwarded(&record.id, true).await;
                record.forwarded = true;
                state.health_registry.set_healthy(Component::ContactInbox).await;
            }
            Err(err) => {
                let message = format!("{:#}", err);
                warn!(id = %record.id, error = %message, "Failed to forward contact message");
                state.metrics.inc_contact_forward_failures();
                state
                    .health_registry
                    .set_degraded(Component::ContactInbox, "Contact webhook unreachable")
                    .await;
            }
        }
    }

    state
        .logger
        .log_contact_received(&record.id, &record.subject, record.forwarded);

    Ok(Json(record))
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Origin to echo back for a request, if allowed
fn allowed_origin(allowed: &[String], origin: Option<&str>) -> Option<String> {
    if allowed.iter().any(|o| o == "*") {
        return Some("*".to_string());
    }
    let origin = origin?;
    allowed
        .iter()
        .any(|o| o == origin)
        .then(|| origin.to_string())
}

async fn cors(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let allow = allowed_origin(&state.cors_origins, origin.as_deref())
        .and_then(|o| HeaderValue::from_str(&o).ok());

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    if let Some(value) = allow {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        );
    }

    response
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/plans", get(plans))
        .route("/api/calculator", post(calculator))
        .route("/api/faqs", get(faqs))
        .route("/api/contact", post(contact))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .layer(middleware::from_fn_with_state(state.clone(), cors))
        .with_state(state)
}

/// Start the API server, stopping when `shutdown` resolves
pub async fn serve(
    port: u16,
    state: Arc<AppState>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
