//! Leptos front-end for the portal (wasm32 only).

pub mod app;
pub mod guard;
pub mod theme_toggle;

use wasm_bindgen::prelude::*;

use ems_auth::Session;

use crate::session_store::{AUTH_KEYS, restore_session};

/// Snapshot of whatever the identity provider left in local storage.
///
/// Anything missing resolves to an anonymous session; an unreadable record
/// is also removed so the next load starts clean.
pub fn stored_session() -> Session {
    let storage = match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        Some(storage) => storage,
        None => return Session::anonymous(),
    };

    let restored = restore_session(|key| storage.get_item(key).ok().flatten());
    if restored.discard_stored {
        for key in AUTH_KEYS {
            let _ = storage.remove_item(key);
        }
    }

    restored.session
}

/// WASM entry point for the frontend.
/// This is called automatically when the WASM module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Forward tracing events (via the `log` bridge) to the browser console.
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger unavailable: {err}").into());
    }

    leptos::mount_to_body(app::App);
}
