//! Forwarding of contact messages to the support inbox webhook

use anyhow::{Context, Result};
use planner_lib::contact::ContactRecord;
use reqwest::Client;
use std::time::Duration;

/// Posts accepted contact messages as JSON to a webhook
#[derive(Debug, Clone)]
pub struct ContactForwarder {
    client: Client,
    webhook_url: reqwest::Url,
}

impl ContactForwarder {
    pub fn new(webhook_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        let webhook_url = reqwest::Url::parse(webhook_url).context("Invalid contact webhook URL")?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    pub fn webhook_url(&self) -> &str {
        self.webhook_url.as_str()
    }

    /// Deliver one message; any non-2xx answer is an error
    pub async fn forward(&self, record: &ContactRecord) -> Result<()> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(record)
            .send()
            .await
            .context("Failed to send contact message")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Contact webhook error ({}): {}", status, body);
        }

        Ok(())
    }
}
