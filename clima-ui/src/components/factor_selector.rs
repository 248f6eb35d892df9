//! Radio group for choosing the displayed factor.

use crate::state::FactorsState;
use clima_core::factor::AnalysisFactor;
use dioxus::prelude::*;

/// Factor radio group. Changing the selection only changes which part of the
/// retained result is shown; it never sends a request.
#[component]
pub fn FactorSelector() -> Element {
    let state = use_context::<FactorsState>();
    let mut form = state.form;
    let selected = form.read().selected_factor();

    rsx! {
        div {
            class: "card",
            strong { "Factor" }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 12px; margin-top: 8px;",
                for factor in AnalysisFactor::UI_ORDER {
                    label {
                        key: "{factor}",
                        style: "display: flex; align-items: center; gap: 6px;",
                        input {
                            r#type: "radio",
                            name: "factor",
                            value: factor.as_str(),
                            checked: factor == selected,
                            onchange: move |_| {
                                log::debug!("displayed factor -> {}", factor);
                                form.write().factor = factor.as_str().to_string();
                            },
                        }
                        "{factor.label()}"
                    }
                }
            }
        }
    }
}
