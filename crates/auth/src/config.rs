//! Guard configuration (environment-driven).

use ems_core::{DomainError, DomainResult, Location};

/// Environment variable overriding the authentication entry point.
pub const AUTH_ENTRY_ENV: &str = "EMS_AUTH_ENTRY";

/// Route the identity provider serves its sign-in flow on.
pub const DEFAULT_AUTH_ENTRY: &str = "/auth";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Where unauthenticated viewers are sent.
    pub auth_entry: Location,
}

impl GuardConfig {
    /// Build a config for an explicit entry point; it must be an absolute path.
    pub fn new(auth_entry: &str) -> DomainResult<Self> {
        if !auth_entry.starts_with('/') {
            return Err(DomainError::validation(format!(
                "auth entry point must be an absolute path, got '{auth_entry}'"
            )));
        }

        Ok(Self {
            auth_entry: Location::parse(auth_entry),
        })
    }

    /// Read the config from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(AUTH_ENTRY_ENV) {
            Some(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            auth_entry: Location::parse(DEFAULT_AUTH_ENTRY),
        }
    }
}
