//! HTTP probing against the portal API.

use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, HeaderMap, ORIGIN};
use thiserror::Error;

use crate::ProbeConfig;
use crate::report::{CorsReport, EndpointReport, EndpointStatus, ProbeSummary, preview};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe config: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Runs the reachability and CORS checks.
#[derive(Debug, Clone)]
pub struct BackendProbe {
    client: reqwest::Client,
    config: ProbeConfig,
}

impl BackendProbe {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Endpoint sweep followed by the preflight check.
    pub async fn run(&self) -> ProbeSummary {
        tracing::info!(api_base = %self.config.api_base, "testing backend connection");

        let endpoints = self.probe_endpoints().await;
        let cors = self.probe_cors().await;

        let summary = ProbeSummary { endpoints, cors };
        tracing::info!(
            passed = summary.passed(),
            total = summary.endpoints.len(),
            "backend connection test completed"
        );
        summary
    }

    /// `GET` every configured endpoint, one at a time.
    pub async fn probe_endpoints(&self) -> Vec<EndpointReport> {
        let mut reports = Vec::with_capacity(self.config.endpoints.len());
        for endpoint in &self.config.endpoints {
            reports.push(self.probe_endpoint(endpoint).await);
        }
        reports
    }

    pub async fn probe_endpoint(&self, endpoint: &str) -> EndpointReport {
        let url = self.config.endpoint_url(endpoint);
        let status = self.fetch_status(&url).await;

        match &status {
            EndpointStatus::Success { status, preview } => {
                tracing::info!(endpoint, status, preview = %preview, "endpoint reachable");
            }
            EndpointStatus::Failed { status, reason } => {
                tracing::warn!(endpoint, status, reason = %reason, "endpoint returned failure");
            }
            EndpointStatus::Error { message } => {
                tracing::error!(endpoint, error = %message, "endpoint unreachable");
            }
        }

        EndpointReport {
            endpoint: endpoint.to_string(),
            url,
            status,
            checked_at: Utc::now(),
        }
    }

    async fn fetch_status(&self, url: &str) -> EndpointStatus {
        let resp = match self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return EndpointStatus::Error { message: e.to_string() },
        };

        let status = resp.status();
        if !status.is_success() {
            return EndpointStatus::Failed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
        }

        match resp.json::<serde_json::Value>().await {
            Ok(body) => EndpointStatus::Success {
                status: status.as_u16(),
                preview: preview(&body),
            },
            Err(e) => EndpointStatus::Error {
                message: format!("unreadable JSON body: {e}"),
            },
        }
    }

    /// Preflight `OPTIONS` as a browser on `origin` would send it.
    pub async fn probe_cors(&self) -> CorsReport {
        let url = self.config.endpoint_url(self.config.cors_endpoint());
        tracing::info!(url = %url, origin = %self.config.origin, "testing CORS configuration");

        let result = self
            .client
            .request(reqwest::Method::OPTIONS, &url)
            .header(ORIGIN, &self.config.origin)
            .header("Access-Control-Request-Method", "GET")
            .header("Access-Control-Request-Headers", "Content-Type")
            .send()
            .await;

        let report = match result {
            Ok(resp) => {
                let headers = resp.headers();
                CorsReport {
                    url,
                    status: Some(resp.status().as_u16()),
                    allow_origin: header_value(headers, "access-control-allow-origin"),
                    allow_methods: header_value(headers, "access-control-allow-methods"),
                    allow_credentials: header_value(headers, "access-control-allow-credentials"),
                    error: None,
                    checked_at: Some(Utc::now()),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "CORS test failed");
                CorsReport {
                    url,
                    error: Some(e.to_string()),
                    checked_at: Some(Utc::now()),
                    ..CorsReport::default()
                }
            }
        };

        tracing::info!(
            allow_origin = ?report.allow_origin,
            allow_methods = ?report.allow_methods,
            allow_credentials = ?report.allow_credentials,
            "CORS headers received"
        );
        report
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
