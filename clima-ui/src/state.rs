//! Application state managed via Dioxus context.
//!
//! `FactorsState` bundles the view's signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<FactorsState>()`. Dropping the view drops the chart cache,
//! which revokes every cached image URL.

use crate::browser::ObjectUrl;
use clima_api::ClimateClient;
use clima_core::analysis::AnalysisCoordinator;
use clima_core::config::ApiConfig;
use clima_core::plot::PlotCache;
use clima_core::prefill::Prefill;
use clima_core::validation::FactorsForm;
use dioxus::prelude::*;
use std::rc::Rc;

/// A fetched chart. Shared between the cache slot and the card showing it;
/// the URL is revoked once neither holds it.
pub type ChartImage = Rc<ObjectUrl>;

#[derive(Clone, Copy)]
pub struct FactorsState {
    /// HTTP client for the analysis service
    pub client: Signal<ClimateClient>,
    /// Raw form fields, including the displayed factor
    pub form: Signal<FactorsForm>,
    /// Loading flag, retained result, toast and the auto-run latch
    pub analysis: Signal<AnalysisCoordinator>,
    /// Last chart per chartable factor, lent to the mounted plot card
    pub plot_cache: Signal<PlotCache<ChartImage>>,
}

impl FactorsState {
    pub fn new(config: ApiConfig, prefill: &Prefill) -> Self {
        log::info!(
            "factors view using service at '{}'",
            config.base_url()
        );
        Self {
            client: Signal::new(ClimateClient::new(config)),
            form: Signal::new(FactorsForm::from_prefill(prefill)),
            analysis: Signal::new(AnalysisCoordinator::new()),
            plot_cache: Signal::new(PlotCache::new()),
        }
    }
}
