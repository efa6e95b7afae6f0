//! What the protected-route wrapper shows for each guard outcome.
//!
//! Shared by the Leptos component and native hosts; contains no UI runtime
//! types so it can be exercised without a browser.

use serde::Serialize;

use ems_auth::{GuardDecision, NavigationRequest, Outcome, Role};

/// Accessible label of the neutral loading indicator.
pub const LOADING_LABEL: &str = "Loading...";

/// Inline notice shown when the viewer's role does not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialNotice {
    pub required: Role,
}

impl DenialNotice {
    pub fn heading(&self) -> &'static str {
        "Access Denied"
    }

    pub fn message(&self) -> &'static str {
        "You don't have permission to access this page."
    }

    pub fn detail(&self) -> String {
        format!("Required role: {}", self.required)
    }
}

/// Render tree selected by the guard, generic over the wrapped content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView<C> {
    Loading,
    /// Nothing is rendered; the router is replacing the current entry.
    Redirecting(NavigationRequest),
    Denied(DenialNotice),
    /// The wrapped content, untouched.
    Content(C),
}

impl<C> GuardView<C> {
    pub fn from_decision(decision: GuardDecision, children: C) -> Self {
        match (decision.outcome, decision.effect) {
            (Outcome::Pending, _) => GuardView::Loading,
            (Outcome::DenyUnauthenticated { .. }, Some(request)) => GuardView::Redirecting(request),
            // `evaluate` always pairs this outcome with an effect; without one
            // there is nothing safe to show but the placeholder.
            (Outcome::DenyUnauthenticated { .. }, None) => GuardView::Loading,
            (Outcome::DenyUnauthorized { required, .. }, _) => {
                GuardView::Denied(DenialNotice { required })
            }
            (Outcome::Allow, _) => GuardView::Content(children),
        }
    }

    pub fn content(&self) -> Option<&C> {
        match self {
            GuardView::Content(c) => Some(c),
            _ => None,
        }
    }
}
