//! Ghostcheck Web Client
//!
//! Browser front end for the CV ghosting analyzer, built with Leptos (WASM).
//!
//! # Pages
//!
//! - `/login` and `/register`: account forms
//! - `/`: dashboard (upload, analyze, history), only with a stored token
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application. Page logic lives in the
//! `ghostcheck` crate's view controllers; this crate supplies the browser
//! pieces (fetch transport, `localStorage` session, page-load navigation)
//! and renders controller state.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    mount_to_body(|| view! { <app::App /> });
}
