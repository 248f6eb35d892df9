//! Historical series chart and CSV download for one factor.
//!
//! The card is keyed by factor in the parent, so switching the displayed
//! factor unmounts it and mounts a fresh one. Fetches still in flight at that
//! point are dropped with the card's scope.

use super::ErrorDisplay;
use crate::browser::{self, ObjectUrl, CSV_MIME, PNG_MIME};
use crate::state::{ChartImage, FactorsState};
use clima_api::driver;
use clima_core::factor::PlotFactor;
use clima_core::plot::{PlotCoordinator, CSV_ERROR_FALLBACK, PLOT_ERROR_FALLBACK};
use clima_core::request::{Aggregation, SeriesRequest};
use clima_core::validation::{SeriesForm, SeriesInputs};
use dioxus::prelude::*;
use std::rc::Rc;

type Card = Signal<PlotCoordinator<ChartImage>>;

async fn load_chart(state: FactorsState, mut card: Card, request: SeriesRequest) {
    let client = state.client.peek().clone();
    let outcome = driver::fetch_plot(&client, &request)
        .await
        .and_then(|bytes| {
            ObjectUrl::from_bytes(&bytes, PNG_MIME).map_err(|e| {
                log::error!("{}", e);
                PLOT_ERROR_FALLBACK.to_string()
            })
        })
        .map(Rc::new);
    let mut cache = state.plot_cache;
    // The replaced image is revoked here unless the card still shows it.
    card.write().complete_plot(outcome, &mut cache.write());
}

async fn save_csv(state: FactorsState, mut card: Card, request: SeriesRequest) {
    let client = state.client.peek().clone();
    let outcome = driver::fetch_csv(&client, &request)
        .await
        .and_then(|bytes| {
            browser::download_bytes(&bytes, &request.csv_filename(), CSV_MIME).map_err(|e| {
                log::error!("{}", e);
                CSV_ERROR_FALLBACK.to_string()
            })
        });
    card.write().complete_csv(outcome);
}

#[derive(Props, Clone, PartialEq)]
pub struct PlotCardProps {
    pub factor: PlotFactor,
}

/// Series controls, the chart image and the two action buttons.
#[component]
pub fn PlotCard(props: PlotCardProps) -> Element {
    let state = use_context::<FactorsState>();
    let factor = props.factor;
    let mut card: Card =
        use_signal(|| PlotCoordinator::mount(factor, &state.plot_cache.peek()));
    let mut series = use_signal(SeriesForm::default);
    let inputs: Memo<Option<SeriesInputs>> =
        use_memo(move || series.read().validate(&state.form.read()).into_value());

    // Re-run whenever the validated parameters change. Only the inputs are
    // tracked, so a failed fetch is not retried until they change again.
    use_effect(move || {
        let current = inputs();
        let request = card.write().auto_load(current.as_ref());
        if let Some(request) = request {
            spawn(load_chart(state, card, request));
        }
    });

    let on_update = move |_| {
        let request = card.write().update_plot(inputs.peek().as_ref());
        if let Some(request) = request {
            spawn(load_chart(state, card, request));
        }
    };

    let on_csv = move |_| {
        let request = card.write().download_csv(inputs.peek().as_ref());
        if let Some(request) = request {
            spawn(save_csv(state, card, request));
        }
    };

    let current = card.read();
    let form = series.read().clone();
    let valid = inputs.read().is_some();
    let disabled = current.buttons_disabled(inputs.read().as_ref());
    let aggregation_disabled = form.aggregation_disabled();
    let aggregation_opacity = if aggregation_disabled { "0.6" } else { "1" };
    let image_url = current.displayed().map(|image| image.as_str().to_string());
    let error = current.error().map(str::to_string);
    let loading_plot = current.is_loading_plot();
    let loading_csv = current.is_loading_csv();
    drop(current);

    rsx! {
        div {
            class: "card",
            style: "margin-top: 12px;",
            h3 { style: "margin-top: 0; margin-bottom: 12px;", "Gráfica histórica + CSV" }

            if !valid {
                div {
                    style: "margin-bottom: 8px; color: #ffdb99; font-size: 13px;",
                    "Completa parámetros válidos para generar la gráfica."
                }
            }

            div {
                style: "display: flex; gap: 12px; flex-wrap: wrap;",
                label {
                    style: "min-width: 140px;",
                    "Ventana (±días)"
                    input {
                        r#type: "number",
                        min: "0",
                        max: "30",
                        value: "{form.half_window}",
                        oninput: move |evt: Event<FormData>| series.write().set_half_window(&evt.value()),
                    }
                }
                label {
                    style: "min-width: 160px; opacity: {aggregation_opacity};",
                    "Agregación"
                    select {
                        disabled: aggregation_disabled,
                        onchange: move |evt: Event<FormData>| series.write().aggregation = evt.value(),
                        for aggregation in Aggregation::ALL {
                            option {
                                key: "{aggregation}",
                                value: aggregation.as_str(),
                                selected: form.aggregation == aggregation.as_str(),
                                "{aggregation}"
                            }
                        }
                    }
                }
                label {
                    style: "display: flex; align-items: center; gap: 8px;",
                    input {
                        r#type: "checkbox",
                        checked: form.trend,
                        onchange: move |evt: Event<FormData>| series.write().trend = evt.checked(),
                    }
                    "Tendencia"
                }
            }

            div {
                style: "display: flex; gap: 12px; margin-top: 12px; flex-wrap: wrap;",
                button {
                    class: "card",
                    disabled: disabled,
                    onclick: on_update,
                    if loading_plot { "Generando…" } else { "Actualizar gráfica" }
                }
                button {
                    class: "card",
                    disabled: disabled,
                    onclick: on_csv,
                    if loading_csv { "Generando CSV…" } else { "Descargar CSV" }
                }
            }

            if let Some(message) = error {
                ErrorDisplay { message }
            }

            if loading_csv {
                div { style: "margin-top: 8px; color: #ffe08a;", "Generando CSV, espere un momento…" }
            }

            if let Some(url) = image_url {
                div {
                    style: "margin-top: 12px;",
                    img {
                        src: "{url}",
                        alt: "Gráfica histórica",
                        style: "width: 100%; height: auto; border-radius: 10px; border: 1px solid rgba(255,255,255,0.2);",
                    }
                }
            }

            div {
                style: "margin-top: 10px; font-size: 12px; opacity: 0.8;",
                "• Si ventana = 0 → día exacto. • Si ventana > 0 → se usa agregación (median/mean/max). • La tendencia es una regresión lineal (OLS)."
            }
        }
    }
}
