//! # member-chat
//!
//! Leptos + WASM browser client for a single-room group chat service.
//!
//! The crate is split into a framework-free core and a thin render layer:
//! `state` owns the session credential, the route guard and the message
//! feed; `net` holds the HTTP gateway and wire types; `util` carries the
//! storage seam and the relative time labels. `pages` and `components`
//! only render whatever state the core produces.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

/// WASM entry point: wire up logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
