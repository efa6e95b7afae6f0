//! `ProtectedRoute`: the guard as a Leptos wrapper component.

use leptos::*;
use leptos_router::{NavigateOptions, State, use_location, use_navigate};

use ems_auth::{GuardConfig, NavigationMode, NavigationRequest, Role, Session, evaluate};
use ems_core::Location;

use crate::view::{GuardView, LOADING_LABEL};

/// Wraps a protected region.
///
/// The decision is re-derived whenever the session or the router location
/// changes. The redirect runs in an effect keyed on the decision memo, so an
/// unchanged denial never navigates twice.
#[component]
pub fn ProtectedRoute(
    #[prop(into)] session: Signal<Session>,
    #[prop(optional)] required_role: Option<Role>,
    #[prop(optional)] config: Option<GuardConfig>,
    children: ChildrenFn,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let router_location = use_location();

    let location = create_memo(move |_| {
        Location::from_parts(
            &router_location.pathname.get(),
            &router_location.search.get(),
            &router_location.hash.get(),
        )
    });

    let decision = create_memo(move |_| {
        session.with(|s| location.with(|loc| evaluate(&config, s, required_role.as_ref(), loc)))
    });

    let navigate = use_navigate();
    create_effect(move |_| {
        if let Some(request) = decision.with(|d| d.effect.clone()) {
            tracing::info!(from = %request.state.from, target = %request.target, "redirecting to sign in");
            navigate(&request.target.to_string(), navigate_options(&request));
        }
    });

    move || match GuardView::from_decision(decision.get(), ()) {
        GuardView::Loading => view! { <LoadingIndicator/> }.into_view(),
        // The effect above performs the navigation; nothing to show meanwhile.
        GuardView::Redirecting(_) => ().into_view(),
        GuardView::Denied(notice) => view! {
            <div class="container mt-5">
                <div class="alert alert-danger" role="alert">
                    <h4 class="alert-heading">{notice.heading()}</h4>
                    <p>{notice.message()}</p>
                    <hr/>
                    <p class="mb-0">{notice.detail()}</p>
                </div>
            </div>
        }
        .into_view(),
        GuardView::Content(()) => children().into_view(),
    }
}

#[component]
fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="d-flex justify-content-center align-items-center min-vh-100">
            <div class="spinner-border text-primary" role="status">
                <span class="visually-hidden">{LOADING_LABEL}</span>
            </div>
        </div>
    }
}

fn navigate_options(request: &NavigationRequest) -> NavigateOptions {
    NavigateOptions {
        replace: request.mode == NavigationMode::Replace,
        state: State(serde_wasm_bindgen::to_value(&request.state).ok()),
        ..Default::default()
    }
}
