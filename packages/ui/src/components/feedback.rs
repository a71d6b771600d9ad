//! Loading, error and empty states.

use dioxus::prelude::*;

use crate::icons::{FaCircleExclamation, FaFolderOpen};
use crate::Icon;

/// Inline error box. Renders nothing for an empty message.
#[component]
pub fn ErrorBanner(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    if message.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "flex items-center gap-2 px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
            role: "alert",
            Icon { icon: FaCircleExclamation, width: 14, height: 14 }
            span { class: "flex-1", "{message}" }
            if let Some(handler) = on_retry {
                button {
                    class: "bg-transparent border-none text-red-700 underline cursor-pointer text-[0.8125rem]",
                    onclick: move |_| handler.call(()),
                    "Try again"
                }
            }
        }
    }
}

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-center gap-2 py-10 text-sm text-neutral-500",
            role: "status",
            span { class: "w-4 h-4 border-2 border-neutral-300 border-t-primary-500 rounded-full animate-spin" }
            "{label}"
        }
    }
}

#[component]
pub fn EmptyState(title: String, message: Option<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center gap-2 py-12 text-center text-neutral-500",
            Icon { icon: FaFolderOpen, width: 28, height: 28 }
            h3 { class: "m-0 text-base font-semibold text-neutral-700", "{title}" }
            if let Some(message) = message {
                p { class: "m-0 text-sm", "{message}" }
            }
            {children}
        }
    }
}
