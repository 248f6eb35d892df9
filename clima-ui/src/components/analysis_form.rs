//! The analysis parameters form.

use super::FactorSelector;
use crate::state::FactorsState;
use clima_core::validation::{FactorsForm, Field, ValidationResult, ValidatedForm};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
struct NumberFieldProps {
    label: &'static str,
    value: String,
    placeholder: &'static str,
    #[props(default)]
    min: &'static str,
    #[props(default)]
    max: &'static str,
    #[props(!optional)]
    error: Option<String>,
    oninput: EventHandler<String>,
}

#[component]
fn NumberField(props: NumberFieldProps) -> Element {
    let oninput = props.oninput;
    let min = (!props.min.is_empty()).then_some(props.min);
    let max = (!props.max.is_empty()).then_some(props.max);

    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px;",
            "{props.label}"
            input {
                r#type: "number",
                step: "any",
                value: "{props.value}",
                placeholder: props.placeholder,
                min: min,
                max: max,
                oninput: move |evt: Event<FormData>| oninput.call(evt.value()),
            }
            if let Some(error) = props.error.as_ref() {
                span { style: "color: #ffb3b3; font-size: 12px;", "{error}" }
            }
        }
    }
}

/// Error for `field`, hidden while the field is still empty.
fn visible_error(
    validation: &ValidationResult<ValidatedForm>,
    field: Field,
    raw: &str,
) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    validation.error(field).map(str::to_string)
}

#[derive(Props, Clone, PartialEq)]
pub struct AnalysisFormProps {
    /// Called when the user submits a valid form.
    pub on_submit: EventHandler<()>,
}

/// Latitude, longitude, month, day and factor inputs with inline errors.
#[component]
pub fn AnalysisForm(props: AnalysisFormProps) -> Element {
    let state = use_context::<FactorsState>();
    let mut form = state.form;
    let current: FactorsForm = form.read().clone();
    let validation = current.validate();
    let can_submit = state.analysis.read().can_submit(&current);
    let loading = state.analysis.read().is_loading();

    rsx! {
        form {
            style: "display: flex; flex-direction: column; gap: 12px;",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                props.on_submit.call(());
            },
            div {
                class: "card",
                NumberField {
                    label: "Latitud",
                    value: current.latitude.clone(),
                    placeholder: "-90 a 90",
                    error: visible_error(&validation, Field::Latitude, &current.latitude),
                    oninput: move |v: String| form.write().latitude = v,
                }
                NumberField {
                    label: "Longitud",
                    value: current.longitude.clone(),
                    placeholder: "cualquier valor, se normaliza",
                    error: visible_error(&validation, Field::Longitude, &current.longitude),
                    oninput: move |v: String| form.write().longitude = v,
                }
            }
            div {
                class: "card",
                NumberField {
                    label: "Mes",
                    value: current.month.clone(),
                    placeholder: "1-12",
                    min: "1",
                    max: "12",
                    error: visible_error(&validation, Field::Month, &current.month),
                    oninput: move |v: String| form.write().month = v,
                }
                NumberField {
                    label: "Día",
                    value: current.day.clone(),
                    placeholder: "1-31",
                    min: "1",
                    max: "31",
                    error: visible_error(&validation, Field::Day, &current.day),
                    oninput: move |v: String| form.write().day = v,
                }
            }
            FactorSelector {}
            div {
                style: "width: 100%;",
                button {
                    class: "card",
                    r#type: "submit",
                    disabled: !can_submit,
                    if loading { "Calculando…" } else { "Calcular" }
                }
            }
        }
    }
}
