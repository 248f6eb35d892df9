//! Inline error message.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Displays an error message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 8px 12px; margin-top: 8px; background: rgba(255,77,79,0.12); color: #ffb3b3; border-radius: 8px; border: 1px solid rgba(255,179,179,0.4);",
            "{props.message}"
        }
    }
}
