//! Mercury API Client

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// API Client for a Mercury server
pub struct MercuryClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub complaint: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TriageResponse {
    pub category: String,
    pub sentiment: String,
    pub urgency: String,
    pub suggested_action: String,
    pub draft_response: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    detail: String,
}

impl MercuryClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch server health
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to Mercury at {}", self.base_url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Triage one complaint
    pub async fn analyze(&self, complaint: &str) -> Result<TriageResponse> {
        let url = format!("{}/analyze", self.base_url);
        let resp = self.client
            .post(&url)
            .json(&AnalyzeRequest { complaint })
            .send()
            .await
            .with_context(|| format!("Failed to connect to Mercury at {}", self.base_url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("{}", describe_error(status, &body));
        }

        resp.json().await.context("Failed to parse response")
    }
}

/// Error message for a non-success response, preferring the server's error body
fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => format!("API error ({}) {}: {}", status, err.error, err.detail),
        Err(_) => format!("API error ({}): {}", status, body),
    }
}
