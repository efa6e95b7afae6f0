use serde::{Deserialize, Serialize};

use crate::Identity;

/// Snapshot of the session source for one render pass.
///
/// Owned and mutated by the session source only; the guard reads a fresh
/// snapshot on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<Identity>,
    pub loading: bool,
}

impl Session {
    /// Resolution in progress, nothing known yet.
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Resolution finished without an identity.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn authenticated(user: Identity) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// Re-resolution in progress while a previous identity is still held.
    pub fn refreshing(stale: Identity) -> Self {
        Self {
            user: Some(stale),
            loading: true,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.loading
    }
}
