use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role tag identifying an authorization tier.
///
/// Roles are opaque strings at this layer and compared exactly. The constants
/// below are the tiers the identity provider issues today; any other tag is
/// equally valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const HR: Role = Role(Cow::Borrowed("hr"));
    pub const EMPLOYEE: Role = Role(Cow::Borrowed("employee"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
