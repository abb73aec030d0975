//! API client for communicating with the plan service

use anyhow::{Context, Result};
use planner_lib::Recommendation;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the plan service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    /// GET a probe endpoint; 503 still carries a JSON body there
    pub async fn probe<T: DeserializeOwned>(&self, path: &str) -> Result<(u16, T)> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status().as_u16();
        let body = response.json().await.context("Failed to parse response")?;
        Ok((status, body))
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            anyhow::bail!("API error ({}): {}", status, message);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API request/response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorRequest {
    pub players: i64,
    pub server_type: String,
    pub performance_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorResponse {
    pub recommended_ram: u64,
    pub recommended_cpu: u64,
    /// Older servers omit the uncapped figure
    #[serde(default)]
    pub required_cpu: Option<u64>,
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
            required_cpu: Some(rec.required_cpu_pct),
            suggested_plan: rec.suggested_plan.name,
            plan_tier: rec.plan_tier.to_string(),
            price: rec.price,
            upgrade_warning: rec.overflow_warning,
        }
    }
}

/// Only the message is shown; `code` and `details` are ignored
#[derive(Debug, Clone, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_lib::catalog::PlanCatalog;

    #[tokio::test]
    async fn test_get_plans() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::to_string(&PlanCatalog::builtin()).unwrap();
        let mock = server
            .mock("GET", "/api/plans")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let catalog: PlanCatalog = client.get("api/plans").await.unwrap();
        assert_eq!(catalog, PlanCatalog::builtin());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_calculator() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/calculator")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "players": 10,
                "server_type": "vanilla",
                "performance_level": "budget"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"recommended_ram":2,"recommended_cpu":15,"suggested_plan":"Dirt","plan_tier":"budget","price":20}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let request = CalculatorRequest {
            players: 10,
            server_type: "vanilla".to_string(),
            performance_level: "budget".to_string(),
        };
        let response: CalculatorResponse = client.post("api/calculator", &request).await.unwrap();

        assert_eq!(response.suggested_plan, "Dirt");
        assert_eq!(response.required_cpu, None);
        assert!(response.upgrade_warning.is_none());
    }

    #[tokio::test]
    async fn test_api_error_uses_error_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/calculator")
            .with_status(422)
            .with_body(r#"{"error":"invalid input: unknown server type 'survival'","code":"invalid_input"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let request = CalculatorRequest {
            players: 10,
            server_type: "survival".to_string(),
            performance_level: "budget".to_string(),
        };
        let err = client
            .post::<CalculatorResponse, _>("api/calculator", &request)
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("422"));
        assert!(message.contains("unknown server type 'survival'"));
    }

    #[tokio::test]
    async fn test_probe_keeps_unavailable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/readyz")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ready":false,"reason":"Service not yet initialized"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let (status, readiness): (u16, planner_lib::ReadinessResponse) =
            client.probe("readyz").await.unwrap();

        assert_eq!(status, 503);
        assert!(!readiness.ready);
        assert_eq!(
            readiness.reason.as_deref(),
            Some("Service not yet initialized")
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }
}
