use dioxus::prelude::*;

use super::Label;

/// Label, control and validation message for one form field.
#[component]
pub fn FormField(
    label: String,
    html_for: String,
    error: Option<String>,
    hint: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-1.5 mb-4",
            Label { html_for: html_for, "{label}" }
            {children}
            if let Some(err) = error {
                p { class: "m-0 text-xs text-red-600", role: "alert", "{err}" }
            } else if let Some(hint) = hint {
                p { class: "m-0 text-xs text-neutral-500", "{hint}" }
            }
        }
    }
}
