//! Card with the rendered rows of the retained analysis result.

use crate::state::FactorsState;
use clima_core::factor::AnalysisFactor;
use clima_core::render::{basis_note, CLIMATOLOGY_NOTE};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ResultsCardProps {
    pub factor: AnalysisFactor,
}

/// Up to four label/value rows for the displayed factor, plus the footer
/// notes.
#[component]
pub fn ResultsCard(props: ResultsCardProps) -> Element {
    let state = use_context::<FactorsState>();
    let rows = state.analysis.read().rows(props.factor);
    let basis = basis_note();

    rsx! {
        div {
            class: "card",
            style: "background: rgba(255,255,255,0.08); color: white;",
            for row in rows.iter() {
                div {
                    key: "{row.label}",
                    style: "display: flex; justify-content: space-between; margin: 6px 0;",
                    span { style: "opacity: 0.85;", "{row.label}" }
                    strong { "{row.value}" }
                }
            }
            div { style: "margin-top: 8px; font-size: 12px; opacity: 0.8;", "{basis}" }
            div { style: "margin-top: 4px; font-size: 12px; opacity: 0.7;", "{CLIMATOLOGY_NOTE}" }
        }
    }
}
