//! Shared Dioxus components and browser bridge for the climate factors app.
//!
//! This crate provides:
//! - `browser`: object URLs, file downloads, `localStorage` and origin lookup
//! - `state`: reactive `FactorsState` with Dioxus Signals
//! - `components`: the form, result card, plot card and the full view

pub mod browser;
pub mod components;
pub mod state;
