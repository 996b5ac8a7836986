//! # page-shell
//!
//! Leptos + WASM rendition of a minimal browser page: a page shell, a
//! stylesheet, and a script layer with DOM helpers, a logging shim, a modal
//! dialog, and a "change background color" demo.
//!
//! Everything that touches the browser is gated behind the `csr` feature.
//! The state machines and flows (`modal`, `store`, `demo`, `config`) compile
//! natively and are tested against in-memory seams.

pub mod app;
#[cfg(feature = "csr")]
pub mod boot;
pub mod config;
pub mod demo;
pub mod dom;
pub mod modal;
pub mod store;
pub mod util;

#[cfg(test)]
mod testing;

/// WASM entry point: mount the shell, then wire the services onto it.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    util::logger::init();
    leptos::mount::mount_to_body(app::App);
    match boot::boot() {
        Some(page) => page.keep(),
        None => log::error!(target: util::logger::TARGET, "page boot failed: no document"),
    }
}
