//! Full-view loading screen shown while an analysis is outstanding.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const ICONS: [&str; 3] = ["☀️", "☁️", "🌧️"];
const ICON_INTERVAL_MS: u32 = 1000;

/// Cycles through weather icons until unmounted.
#[component]
pub fn LoadingScreen() -> Element {
    let mut index = use_signal(|| 0usize);

    use_future(move || async move {
        loop {
            TimeoutFuture::new(ICON_INTERVAL_MS).await;
            let next = (*index.peek() + 1) % ICONS.len();
            index.set(next);
        }
    });

    let icon = ICONS[index()];

    rsx! {
        div {
            style: "display: flex; flex-direction: column; justify-content: center; align-items: center; min-height: 60vh; color: white;",
            h1 { style: "margin-bottom: 24px;", "Análisis en Progreso" }
            div { style: "font-size: 72px;", "{icon}" }
            p { style: "opacity: 0.8;", "Procesando…" }
        }
    }
}
