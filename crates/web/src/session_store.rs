//! Restoring the session the identity provider persisted in browser storage.
//!
//! Storage access is passed in as a lookup so the rules run natively in tests.

use ems_auth::{Identity, Session};

pub const TOKEN_KEY: &str = "token";
pub const LEGACY_TOKEN_KEY: &str = "ems_token";
pub const USER_KEY: &str = "user";
pub const LEGACY_USER_KEY: &str = "ems_user";
pub const AUTHENTICATED_FLAG_KEY: &str = "isAuthenticated";

/// Every key cleared when the stored record turns out to be unreadable.
pub const AUTH_KEYS: [&str; 5] = [
    TOKEN_KEY,
    USER_KEY,
    LEGACY_TOKEN_KEY,
    LEGACY_USER_KEY,
    AUTHENTICATED_FLAG_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredSession {
    pub session: Session,
    /// The stored record was present but corrupt; the caller should remove
    /// every key in [`AUTH_KEYS`].
    pub discard_stored: bool,
}

impl RestoredSession {
    fn anonymous(discard_stored: bool) -> Self {
        Self {
            session: Session::anonymous(),
            discard_stored,
        }
    }
}

/// Resolve the stored session.
///
/// A viewer counts as signed in only when a token, a user record, and the
/// `isAuthenticated == "true"` flag are all present. The unprefixed keys win
/// over the `ems_` ones; empty values count as missing.
pub fn restore_session<F>(get: F) -> RestoredSession
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| get(key).filter(|v| !v.is_empty());

    let token = read(TOKEN_KEY).or_else(|| read(LEGACY_TOKEN_KEY));
    let user = read(USER_KEY).or_else(|| read(LEGACY_USER_KEY));
    let flagged = read(AUTHENTICATED_FLAG_KEY).is_some_and(|v| v == "true");

    let raw = match (token, user) {
        (Some(_), Some(raw)) if flagged => raw,
        _ => return RestoredSession::anonymous(false),
    };

    match serde_json::from_str::<Identity>(&raw) {
        Ok(identity) => {
            tracing::debug!(role = ?identity.role(), "session restored from storage");
            RestoredSession {
                session: Session::authenticated(identity),
                discard_stored: false,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "stored user record is unreadable; clearing it");
            RestoredSession::anonymous(true)
        }
    }
}
