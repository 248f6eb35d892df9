//! The factors view: parameters form on the left, results on the right.

use super::{AnalysisForm, LoadingScreen, PlotCard, ResultsCard, Toast};
use crate::state::FactorsState;
use clima_api::driver::{self, Submission};
use clima_core::factor::PlotFactor;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

/// Submit the current form and record the outcome. A failure raises a toast
/// that is cleared after its dismissal delay unless a newer one replaced it.
fn start_analysis(state: FactorsState, submission: Submission) {
    let mut analysis = state.analysis;
    let form = state.form.peek().clone();
    let request = match submission {
        Submission::Explicit => analysis.write().submit(&form),
        Submission::Auto => analysis.write().auto_submit(&form),
    };
    let Some(request) = request else {
        return;
    };
    let client = state.client.peek().clone();

    spawn(async move {
        let outcome = driver::fetch_analysis(&client, &request).await;
        if analysis.write().complete(outcome).is_none() {
            return;
        }
        let pending = analysis.peek().toast().cloned();
        if let Some(toast) = pending {
            let id = driver::expire_toast(toast, TimeoutFuture::new).await;
            analysis.write().dismiss_toast(id);
        }
    });
}

/// Root of the factors page. Expects a [`FactorsState`] in context.
#[component]
pub fn FactorsView() -> Element {
    let state = use_context::<FactorsState>();

    // Entering the view with a complete, valid selection runs the analysis
    // once. Nothing is tracked here, so the effect never re-runs.
    use_effect(move || start_analysis(state, Submission::Auto));

    let analysis = state.analysis.read();
    let loading = analysis.is_loading();
    let has_result = analysis.result().is_some();
    let toast = analysis.toast().map(|t| t.message.clone());
    drop(analysis);
    let factor = state.form.read().selected_factor();
    let plot_factor = PlotFactor::try_from(factor).ok();

    if loading {
        return rsx! { LoadingScreen {} };
    }

    rsx! {
        div {
            style: "display: flex; gap: 24px; flex-wrap: wrap; padding: 24px; color: white;",
            div {
                style: "flex: 1 1 320px;",
                h1 { "Parámetros de análisis" }
                AnalysisForm { on_submit: move |_| start_analysis(state, Submission::Explicit) }
            }
            div {
                style: "flex: 1 1 320px;",
                h1 { "Resultados" }
                if !has_result {
                    div { "Completa el formulario y presiona Calcular." }
                } else {
                    ResultsCard { factor }
                    if let Some(plot_factor) = plot_factor {
                        PlotCard { key: "{plot_factor}", factor: plot_factor }
                    }
                }
            }
        }
        if let Some(message) = toast {
            Toast { message }
        }
    }
}
