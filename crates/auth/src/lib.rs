//! `ems-auth` — navigation access guard for the EMS portal.
//!
//! The guard turns (session snapshot, required role, location) into a render
//! decision plus at most one navigation effect. It is decoupled from any UI
//! runtime: hosts inject a session source and a navigator explicitly.

pub mod config;
pub mod guard;
pub mod identity;
pub mod roles;
pub mod runner;
pub mod session;
pub mod source;

pub use config::GuardConfig;
pub use guard::{
    AccessDenied, AccessExplanation, DenialKind, GuardDecision, NavigationMode,
    NavigationRequest, NavigationState, Outcome, decide, evaluate, explain,
};
pub use identity::Identity;
pub use roles::Role;
pub use runner::{GuardLoop, Navigator};
pub use session::Session;
pub use source::{
    InMemorySessionSource, LocationSource, SessionSource, SessionSubscription, SourceError,
    StaticLocation,
};

pub use ems_core::Location;
