//! Shared Dioxus components and D3.js bridge for the COVID-19 dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for D3.js chart functions via `js_sys::eval()`,
//!   plus the browser `fetch` of the dataset
//! - `source`: `BrowserSource`, the dataset loader's source inside the browser
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (controls, counters, containers, etc.)

pub mod js_bridge;
pub mod source;
pub mod state;
pub mod components;
