//! Client side of the climate analysis service.
//!
//! [`ClimateClient`] speaks HTTP; [`ClimateService`] is the seam the UI and
//! the CLI depend on; [`driver`] runs the sans-IO coordinators from
//! `clima-core` against any service.

pub mod client;
pub mod driver;
pub mod error;
pub mod service;

pub use client::ClimateClient;
pub use error::{ApiError, Result};
pub use service::ClimateService;
