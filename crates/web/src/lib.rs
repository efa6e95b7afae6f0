//! `ems-web`
//!
//! **Responsibility:** presentation side of the EMS portal.
//!
//! This crate provides:
//! - The render mapping for guard outcomes (`view`)
//! - Restoring the persisted session from browser storage (`session_store`)
//! - Theme state and the toggle's transition timeline (`theme`)
//! - The Leptos front-end, compiled for `wasm32` only (`frontend`)

pub mod session_store;
pub mod theme;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use session_store::{RestoredSession, restore_session};
pub use theme::{Theme, ThemeSource, ThemeState, ToggleAnimation};
pub use view::{DenialNotice, GuardView};
