//! Transient error toast.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ToastProps {
    pub message: String,
}

/// Bottom-right error notice. Dismissal is timed by the view that raised it.
#[component]
pub fn Toast(props: ToastProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "position: fixed; right: 16px; bottom: 16px; background: #ff4d4f; color: white; padding: 10px 14px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.25);",
            "{props.message}"
        }
    }
}
