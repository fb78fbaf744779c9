//! SellerNavi client core.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser client for the SellerNavi price-tracking product. The session
//! lifecycle (`services::token`, `services::session`, `state::auth`) and the
//! plan gate (`plan`) carry the real state; auth, search and billing calls are
//! simulated behind `services::auth` until a backend exists.
//!
//! Browser-only code is compiled under the `csr` feature. Without it every
//! storage, navigation and timer helper degrades to a no-op so the core can be
//! exercised natively.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod plan;
pub mod services;
pub mod state;
pub mod util;

/// Browser entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger unavailable: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
