//! csvchart viewer
//!
//! Single-page viewer built with Leptos (WASM). The user picks a local CSV
//! file; its rows are shown as a table and, for date/category/count data,
//! plotted as one line per category.
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos app. Parsing, grouping and chart layout
//! live in the `csvchart` crate; this crate supplies DOM-backed mount points
//! for its `TableMount` and `ChartSurface` traits.

use leptos::*;

mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
