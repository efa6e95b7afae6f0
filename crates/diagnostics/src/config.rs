//! Probe configuration (environment-driven).

use std::time::Duration;

use crate::ProbeError;

pub const API_URL_ENV: &str = "EMS_API_URL";
pub const ORIGIN_ENV: &str = "EMS_PROBE_ORIGIN";
pub const TIMEOUT_ENV: &str = "EMS_PROBE_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Endpoints the front-end depends on.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "/demo/roles",
    "/demo/credentials/admin",
    "/demo/users",
    "/demo/departments",
    "/admin/employees/stats",
    "/admin/departments/stats",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub api_base: String,
    /// Origin presented in the CORS preflight.
    pub origin: String,
    pub endpoints: Vec<String>,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ProbeConfig {
    pub fn from_env() -> Result<Self, ProbeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProbeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().to_string();
        }
        if let Some(origin) = lookup(ORIGIN_ENV).filter(|v| !v.trim().is_empty()) {
            config.origin = origin.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ProbeError::InvalidConfig(format!("{TIMEOUT_ENV} must be whole seconds, got '{raw}'"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if !config.api_base.starts_with("http://") && !config.api_base.starts_with("https://") {
            return Err(ProbeError::InvalidConfig(format!(
                "{API_URL_ENV} must be an http(s) URL, got '{}'",
                config.api_base
            )));
        }

        Ok(config)
    }

    /// Full URL for an endpoint path.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }

    /// Endpoint used for the preflight check (the first one configured).
    pub fn cors_endpoint(&self) -> &str {
        self.endpoints.first().map(String::as_str).unwrap_or("/")
    }
}
