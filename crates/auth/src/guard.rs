use serde::{Deserialize, Serialize};
use thiserror::Error;

use ems_core::Location;

use crate::{GuardConfig, Role, Session};

/// Result of guarding one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Session resolution still in progress.
    Pending,

    /// No identity; the caller must send the viewer to the auth entry point.
    DenyUnauthenticated { return_to: Location },

    /// Identity present but its role does not match.
    ///
    /// `actual` is `None` when the identity carries no role at all.
    DenyUnauthorized {
        required: Role,
        actual: Option<Role>,
    },

    /// Render the protected content.
    Allow,
}

impl Outcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Outcome::Allow)
    }

    /// Collapse the outcome into a `Result` for callers that only need yes/no.
    pub fn into_result(self) -> Result<(), AccessDenied> {
        match self {
            Outcome::Allow => Ok(()),
            Outcome::Pending => Err(AccessDenied::Pending),
            Outcome::DenyUnauthenticated { .. } => Err(AccessDenied::Unauthenticated),
            Outcome::DenyUnauthorized { required, actual } => {
                Err(AccessDenied::Unauthorized { required, actual })
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("session is still resolving")]
    Pending,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden: required role '{required}', viewer has {}", display_role(.actual))]
    Unauthorized {
        required: Role,
        actual: Option<Role>,
    },
}

fn display_role(role: &Option<Role>) -> String {
    match role {
        Some(role) => format!("'{role}'"),
        None => "no role".to_string(),
    }
}

/// Decide whether the viewer may see a protected region.
///
/// Precedence is fixed: `loading` masks everything, then a missing identity,
/// then the role check. Total over its inputs; no IO, no panics.
pub fn decide(session: &Session, required: Option<&Role>, location: &Location) -> Outcome {
    if session.loading {
        return Outcome::Pending;
    }

    let Some(user) = session.user.as_ref() else {
        return Outcome::DenyUnauthenticated {
            return_to: location.clone(),
        };
    };

    match required {
        Some(required) if user.role() != Some(required) => Outcome::DenyUnauthorized {
            required: required.clone(),
            actual: user.role.clone(),
        },
        _ => Outcome::Allow,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Navigation effect
// ─────────────────────────────────────────────────────────────────────────────

/// How the router should apply a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    Push,
    /// Overwrite the current history entry.
    Replace,
}

/// History state attached to the redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub from: Location,
}

/// The one command the guard hands to the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub target: Location,
    pub state: NavigationState,
    pub mode: NavigationMode,
}

impl NavigationRequest {
    /// Redirect to the auth entry point, replacing the denied history entry.
    pub fn to_auth_entry(config: &GuardConfig, from: Location) -> Self {
        Self {
            target: config.auth_entry.clone(),
            state: NavigationState { from },
            mode: NavigationMode::Replace,
        }
    }
}

/// A decision plus the side effect the caller must execute (at most one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub outcome: Outcome,
    pub effect: Option<NavigationRequest>,
}

/// Decide and derive the navigation effect.
///
/// `effect` is `Some` iff the outcome is `DenyUnauthenticated`. Executing it
/// is the caller's job; see `GuardLoop` for a dispatcher that does it once.
pub fn evaluate(
    config: &GuardConfig,
    session: &Session,
    required: Option<&Role>,
    location: &Location,
) -> GuardDecision {
    let outcome = decide(session, required, location);
    let effect = match &outcome {
        Outcome::DenyUnauthenticated { return_to } => {
            Some(NavigationRequest::to_auth_entry(config, return_to.clone()))
        }
        _ => None,
    };

    GuardDecision { outcome, effect }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a guard decision.
///
/// Answers "why was this view shown/hidden?" in a form that can be logged
/// or rendered in an admin diagnostics panel.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub location: Location,
    pub required_role: Option<String>,
    pub granted: bool,
    pub reason: String,
    pub viewer: ViewerState,
    pub denial_reason: Option<DenialReason>,
}

/// Viewer state as observed by the guard.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerState {
    pub resolved: bool,
    pub authenticated: bool,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    RoleMismatch,
    MissingRole,
}

/// Explain the decision `decide` would make for these inputs.
pub fn explain(session: &Session, required: Option<&Role>, location: &Location) -> AccessExplanation {
    let outcome = decide(session, required, location);

    let viewer = ViewerState {
        resolved: session.is_resolved(),
        authenticated: session.user.is_some(),
        role: session
            .user
            .as_ref()
            .and_then(|u| u.role())
            .map(|r| r.as_str().to_string()),
    };

    let (reason, denial_reason) = match &outcome {
        Outcome::Pending => ("Session resolution is still in progress".to_string(), None),
        Outcome::Allow => {
            let reason = match required {
                Some(role) => format!("Viewer holds the required role '{role}'"),
                None => "Viewer is authenticated and no role is required".to_string(),
            };
            (reason, None)
        }
        Outcome::DenyUnauthenticated { return_to } => (
            format!("No signed-in viewer; redirecting to sign in from '{return_to}'"),
            Some(DenialReason {
                kind: DenialKind::Unauthenticated,
                message: "Viewer is not authenticated".to_string(),
                suggestions: vec![
                    "Sign in; the viewer is returned to the requested page afterwards".to_string(),
                ],
            }),
        ),
        Outcome::DenyUnauthorized { required, actual: Some(actual) } => (
            format!("Viewer has role '{actual}' but '{required}' is required"),
            Some(DenialReason {
                kind: DenialKind::RoleMismatch,
                message: format!("Missing required role: '{required}'"),
                suggestions: vec![
                    format!("Sign in with an account holding the '{required}' role"),
                    format!("Ask an administrator to assign the '{required}' role"),
                ],
            }),
        ),
        Outcome::DenyUnauthorized { required, actual: None } => (
            format!("Viewer record carries no role; '{required}' is required"),
            Some(DenialReason {
                kind: DenialKind::MissingRole,
                message: "Identity record has no role attribute".to_string(),
                suggestions: vec![
                    "Check the identity provider issues a role for this account".to_string(),
                ],
            }),
        ),
    };

    AccessExplanation {
        location: location.clone(),
        required_role: required.map(|r| r.as_str().to_string()),
        granted: outcome.is_allowed(),
        reason,
        viewer,
        denial_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Identity;
    use proptest::prelude::*;

    fn dashboard() -> Location {
        Location::parse("/dashboard")
    }

    #[test]
    fn loading_renders_pending_without_effect() {
        let decision = evaluate(
            &GuardConfig::default(),
            &Session::loading(),
            Some(&Role::ADMIN),
            &dashboard(),
        );
        assert_eq!(decision.outcome, Outcome::Pending);
        assert_eq!(decision.effect, None);
    }

    #[test]
    fn stale_user_is_masked_while_loading() {
        let session = Session::refreshing(Identity::with_role(Role::ADMIN));
        assert_eq!(decide(&session, Some(&Role::ADMIN), &dashboard()), Outcome::Pending);
        assert_eq!(decide(&session, None, &dashboard()), Outcome::Pending);
    }

    #[test]
    fn anonymous_is_redirected_with_return_target() {
        let decision = evaluate(&GuardConfig::default(), &Session::anonymous(), None, &dashboard());

        assert_eq!(
            decision.outcome,
            Outcome::DenyUnauthenticated { return_to: dashboard() }
        );
        let effect = decision.effect.expect("redirect effect");
        assert_eq!(effect.target.to_string(), "/auth");
        assert_eq!(effect.state.from, dashboard());
        assert_eq!(effect.mode, NavigationMode::Replace);
    }

    #[test]
    fn role_mismatch_reports_both_roles() {
        let session = Session::authenticated(Identity::with_role(Role::EMPLOYEE));
        let decision = evaluate(&GuardConfig::default(), &session, Some(&Role::ADMIN), &dashboard());

        assert_eq!(
            decision.outcome,
            Outcome::DenyUnauthorized {
                required: Role::ADMIN,
                actual: Some(Role::EMPLOYEE),
            }
        );
        assert_eq!(decision.effect, None);
    }

    #[test]
    fn matching_role_is_allowed() {
        let session = Session::authenticated(Identity::with_role(Role::ADMIN));
        assert_eq!(decide(&session, Some(&Role::ADMIN), &dashboard()), Outcome::Allow);
    }

    #[test]
    fn no_required_role_allows_any_identity() {
        let session = Session::authenticated(Identity::with_role(Role::ADMIN));
        assert_eq!(decide(&session, None, &dashboard()), Outcome::Allow);

        let roleless = Session::authenticated(Identity::default());
        assert_eq!(decide(&roleless, None, &dashboard()), Outcome::Allow);
    }

    #[test]
    fn roleless_identity_fails_closed() {
        let session = Session::authenticated(Identity::default());
        let outcome = decide(&session, Some(&Role::EMPLOYEE), &dashboard());
        assert_eq!(
            outcome,
            Outcome::DenyUnauthorized {
                required: Role::EMPLOYEE,
                actual: None,
            }
        );

        let err = outcome.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden: required role 'employee', viewer has no role"
        );
    }

    #[test]
    fn into_result_maps_each_outcome() {
        assert_eq!(Outcome::Allow.into_result(), Ok(()));
        assert_eq!(Outcome::Pending.into_result(), Err(AccessDenied::Pending));
        assert_eq!(
            Outcome::DenyUnauthenticated { return_to: dashboard() }.into_result(),
            Err(AccessDenied::Unauthenticated)
        );
    }

    #[test]
    fn explanation_names_the_mismatch() {
        let session = Session::authenticated(Identity::with_role(Role::HR));
        let explanation = explain(&session, Some(&Role::ADMIN), &dashboard());

        assert!(!explanation.granted);
        assert_eq!(explanation.viewer.role.as_deref(), Some("hr"));
        let denial = explanation.denial_reason.expect("denial");
        assert_eq!(denial.kind, DenialKind::RoleMismatch);
        assert!(denial.message.contains("'admin'"));

        let json = serde_json::to_value(&explain(&Session::loading(), None, &dashboard())).unwrap();
        assert_eq!(json["granted"], false);
        assert!(json["denial_reason"].is_null());
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(Outcome::DenyUnauthorized {
            required: Role::ADMIN,
            actual: Some(Role::EMPLOYEE),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "deny_unauthorized", "required": "admin", "actual": "employee" })
        );
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::ADMIN),
            Just(Role::HR),
            Just(Role::EMPLOYEE),
            "[a-z]{1,8}".prop_map(Role::new),
        ]
    }

    fn identity_strategy() -> impl Strategy<Value = Identity> {
        proptest::option::of(role_strategy()).prop_map(|role| Identity {
            role,
            ..Identity::default()
        })
    }

    fn location_strategy() -> impl Strategy<Value = Location> {
        "/[a-z/]{0,12}(\\?[a-z=&]{1,6})?".prop_map(|href| Location::parse(&href))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: loading always yields Pending.
        #[test]
        fn loading_is_always_pending(
            user in proptest::option::of(identity_strategy()),
            required in proptest::option::of(role_strategy()),
            location in location_strategy(),
        ) {
            let session = Session { user, loading: true };
            prop_assert_eq!(decide(&session, required.as_ref(), &location), Outcome::Pending);
        }

        /// Property: resolved and absent carries exactly the supplied location.
        #[test]
        fn anonymous_carries_location(
            required in proptest::option::of(role_strategy()),
            location in location_strategy(),
        ) {
            let outcome = decide(&Session::anonymous(), required.as_ref(), &location);
            prop_assert_eq!(outcome, Outcome::DenyUnauthenticated { return_to: location });
        }

        /// Property: with a resolved identity, Allow iff no role is required or roles match.
        #[test]
        fn role_check_is_exact(
            identity in identity_strategy(),
            required in proptest::option::of(role_strategy()),
            location in location_strategy(),
        ) {
            let session = Session::authenticated(identity.clone());
            let outcome = decide(&session, required.as_ref(), &location);

            match required {
                None => prop_assert_eq!(outcome, Outcome::Allow),
                Some(required) if identity.role.as_ref() == Some(&required) => {
                    prop_assert_eq!(outcome, Outcome::Allow)
                }
                Some(required) => prop_assert_eq!(
                    outcome,
                    Outcome::DenyUnauthorized { required, actual: identity.role.clone() }
                ),
            }
        }

        /// Property: identical inputs give identical decisions.
        #[test]
        fn evaluate_is_deterministic(
            user in proptest::option::of(identity_strategy()),
            loading in any::<bool>(),
            required in proptest::option::of(role_strategy()),
            location in location_strategy(),
        ) {
            let config = GuardConfig::default();
            let session = Session { user, loading };
            let first = evaluate(&config, &session, required.as_ref(), &location);
            let second = evaluate(&config, &session, required.as_ref(), &location);
            prop_assert_eq!(first.effect.is_some(), matches!(first.outcome, Outcome::DenyUnauthenticated { .. }));
            prop_assert_eq!(first, second);
        }
    }
}
