//! Viewer location (where navigation was headed).

use serde::{Deserialize, Serialize};

use crate::ValueObject;

/// A location inside the portal, shaped like a browser location.
///
/// The guard treats this as opaque: it is captured when a decision is made
/// and carried through the redirect unmodified, so the identity provider can
/// send the viewer back after signing in.
///
/// `search` keeps its leading `?` and `hash` its leading `#` (empty when not
/// present), so `to_string()` reassembles the original href.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub hash: String,
}

impl Location {
    /// Parse an href-like string (`/path?query#fragment`).
    ///
    /// Never fails; an empty path becomes `/`.
    pub fn parse(href: &str) -> Self {
        let (before_hash, hash) = match href.find('#') {
            Some(idx) => (&href[..idx], &href[idx..]),
            None => (href, ""),
        };
        let (pathname, search) = match before_hash.find('?') {
            Some(idx) => (&before_hash[..idx], &before_hash[idx..]),
            None => (before_hash, ""),
        };

        Self {
            pathname: if pathname.is_empty() {
                "/".to_string()
            } else {
                pathname.to_string()
            },
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Assemble from router parts; `search`/`hash` may omit their prefix.
    pub fn from_parts(pathname: &str, search: &str, hash: &str) -> Self {
        let prefixed = |value: &str, prefix: char| {
            if value.is_empty() || value.starts_with(prefix) {
                value.to_string()
            } else {
                format!("{prefix}{value}")
            }
        };

        Self {
            pathname: if pathname.is_empty() {
                "/".to_string()
            } else {
                pathname.to_string()
            },
            search: prefixed(search, '?'),
            hash: prefixed(hash, '#'),
        }
    }

    pub fn root() -> Self {
        Self::parse("/")
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl ValueObject for Location {}
