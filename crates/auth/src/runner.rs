//! Guard loop: re-evaluates on every session change and executes the
//! redirect effect outside the pure decision step.

use ems_core::Location;

use crate::guard::{NavigationRequest, Outcome, evaluate};
use crate::source::{LocationSource, SessionSource, SessionSubscription, SourceError};
use crate::{GuardConfig, Role, Session};

/// The router collaborator.
pub trait Navigator {
    fn navigate(&self, request: &NavigationRequest);
}

impl<F> Navigator for F
where
    F: Fn(&NavigationRequest),
{
    fn navigate(&self, request: &NavigationRequest) {
        self(request)
    }
}

/// Drives render passes for one protected region.
///
/// Outcomes are never cached: each pass decides from scratch. The only state
/// kept is the last redirect dispatched, so an unchanged denial does not
/// navigate twice. Any pass that does not redirect clears it.
pub struct GuardLoop<N> {
    config: GuardConfig,
    required: Option<Role>,
    navigator: N,
    last_redirect: Option<NavigationRequest>,
}

impl<N: Navigator> GuardLoop<N> {
    pub fn new(config: GuardConfig, required: Option<Role>, navigator: N) -> Self {
        Self {
            config,
            required,
            navigator,
            last_redirect: None,
        }
    }

    pub fn required_role(&self) -> Option<&Role> {
        self.required.as_ref()
    }

    /// Evaluate one render pass and dispatch its effect if it is new.
    pub fn render_pass(&mut self, session: &Session, location: &Location) -> Outcome {
        let decision = evaluate(&self.config, session, self.required.as_ref(), location);

        tracing::debug!(
            outcome = ?decision.outcome,
            location = %location,
            required_role = ?self.required,
            "guard render pass"
        );

        match decision.effect {
            Some(request) => {
                if self.last_redirect.as_ref() != Some(&request) {
                    tracing::info!(
                        from = %request.state.from,
                        target = %request.target,
                        "redirecting unauthenticated viewer"
                    );
                    self.navigator.navigate(&request);
                    self.last_redirect = Some(request);
                }
            }
            None => self.last_redirect = None,
        }

        decision.outcome
    }

    /// Run passes until the source drops the subscription.
    ///
    /// Subscribe before calling so no change between subscription and the
    /// initial snapshot is missed. Notifications only wake the loop: queued
    /// ones are drained and the pass runs on the source's latest snapshot, so
    /// a stale session never drives a redirect. Every outcome is handed to
    /// `on_outcome` (the host's renderer).
    pub fn run<S, L, F>(
        &mut self,
        source: &S,
        locations: &L,
        subscription: &SessionSubscription,
        mut on_outcome: F,
    ) -> Result<(), SourceError>
    where
        S: SessionSource + ?Sized,
        L: LocationSource + ?Sized,
        F: FnMut(&Outcome),
    {
        let snapshot = source.snapshot()?;
        let outcome = self.render_pass(&snapshot, &locations.current());
        on_outcome(&outcome);

        while subscription.recv().is_ok() {
            while subscription.try_recv().is_ok() {}

            let snapshot = source.snapshot()?;
            let outcome = self.render_pass(&snapshot, &locations.current());
            on_outcome(&outcome);
        }

        tracing::debug!("session source closed; guard loop stopped");
        Ok(())
    }
}
