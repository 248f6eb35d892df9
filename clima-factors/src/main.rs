//! Climate factors for a place and day of the year
//!
//! Shows the climatological statistics of five weather factors for the point
//! and day picked on the map and date views, with a yearly series chart and a
//! CSV export for the chartable factors.
//!
//! Data flow:
//! 1. On mount, the last map/date selection is read from `localStorage` and
//!    seeds the form; a complete, valid selection runs the analysis once.
//! 2. "Calcular" posts all five factors to the analysis service; the selected
//!    factor only chooses which rows of the retained result are shown.
//! 3. The plot card for the selected factor reuses the chart cached for it,
//!    or fetches one when parameters are valid.

use clima_ui::browser;
use clima_ui::components::FactorsView;
use clima_ui::state::FactorsState;
use dioxus::prelude::*;

/// Root of the analysis service. Unset or empty means same origin.
const API_BASE: Option<&str> = option_env!("CLIMA_API_BASE");

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("clima-factors-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let prefill = browser::read_prefill();
        if prefill.is_empty() {
            log::info!("no stored selection, starting with an empty form");
        }
        FactorsState::new(browser::api_config(API_BASE), &prefill)
    });

    rsx! {
        FactorsView {}
    }
}
