use serde::{Deserialize, Deserializer, Serialize};

use crate::Role;

/// Resolved viewer record, as stored by the identity provider.
///
/// The guard reads only `role`; the remaining fields travel along for the
/// views that render the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// `None` for a malformed record with no usable role.
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_email_verified: bool,
}

impl Identity {
    /// Minimal identity carrying only a role; handy for hosts and tests.
    pub fn with_role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }
}

// Missing, null and blank roles all collapse to `None`.
fn deserialize_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|r| !r.trim().is_empty())
        .map(Role::new))
}
