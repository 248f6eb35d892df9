//! Domain core for the climate factors front-end.
//!
//! Everything here is free of I/O so it can be shared by the WASM app and the
//! native CLI, and tested without a browser:
//! - `geo` / `calendar`: longitude wraparound and day-of-month checks
//! - `factor`: the UI factor enum and its wire-name translation table
//! - `request` / `response`: request bodies and the analysis response shape
//! - `validation`: field-by-field validation of the raw form strings
//! - `render`: projection of an analysis response into display rows
//! - `analysis` / `plot`: the request coordinators and the per-factor chart cache
//! - `prefill`: the last map/date selection persisted by the picker views
//! - `config`: endpoint root and the fixed analysis constants

pub mod analysis;
pub mod calendar;
pub mod config;
pub mod factor;
pub mod geo;
pub mod plot;
pub mod prefill;
pub mod render;
pub mod request;
pub mod response;
pub mod validation;
