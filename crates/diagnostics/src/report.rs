//! Probe results.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Max characters of a response body kept in a report.
pub const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointStatus {
    /// 2xx with a JSON body.
    Success { status: u16, preview: String },
    /// Non-2xx response.
    Failed { status: u16, reason: String },
    /// Transport failure or unreadable body.
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointReport {
    pub endpoint: String,
    pub url: String,
    pub status: EndpointStatus,
    pub checked_at: DateTime<Utc>,
}

impl EndpointReport {
    pub fn is_success(&self) -> bool {
        matches!(self.status, EndpointStatus::Success { .. })
    }
}

/// Preflight response headers, or why the preflight failed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorsReport {
    pub url: String,
    pub status: Option<u16>,
    pub allow_origin: Option<String>,
    pub allow_methods: Option<String>,
    pub allow_credentials: Option<String>,
    pub error: Option<String>,
    pub checked_at: Option<DateTime<Utc>>,
}

impl CorsReport {
    /// Whether the backend allows `origin` (exactly or via `*`).
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allow_origin
            .as_deref()
            .is_some_and(|allowed| allowed == "*" || allowed == origin)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeSummary {
    pub endpoints: Vec<EndpointReport>,
    pub cors: CorsReport,
}

impl ProbeSummary {
    pub fn passed(&self) -> usize {
        self.endpoints.iter().filter(|r| r.is_success()).count()
    }
}

/// Compact, truncated rendering of a JSON body.
pub fn preview(body: &serde_json::Value) -> String {
    let rendered = body.to_string();
    match rendered.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &rendered[..idx]),
        None => rendered,
    }
}
