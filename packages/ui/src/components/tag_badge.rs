use dioxus::prelude::*;

use crate::icons::FaXmark;
use crate::Icon;

/// Pill for a tag or technology. Shows a remove button when `on_remove` is set
/// and highlights when `active`.
#[component]
pub fn TagBadge(
    label: String,
    #[props(default)] active: bool,
    onclick: Option<EventHandler<()>>,
    on_remove: Option<EventHandler<()>>,
) -> Element {
    let class = if active {
        "inline-flex items-center gap-1 px-2 py-0.5 rounded-full text-xs bg-primary-500 text-white border border-primary-500"
    } else {
        "inline-flex items-center gap-1 px-2 py-0.5 rounded-full text-xs bg-neutral-100 text-neutral-700 border border-neutral-200"
    };
    let cursor = if onclick.is_some() { "cursor-pointer" } else { "" };

    rsx! {
        span {
            class: "{class} {cursor}",
            onclick: move |_| {
                if let Some(handler) = &onclick {
                    handler.call(());
                }
            },
            "{label}"
            if let Some(handler) = on_remove {
                button {
                    class: "inline-flex bg-transparent border-none p-0 text-inherit cursor-pointer opacity-70 hover:opacity-100",
                    title: "Remove",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        handler.call(());
                    },
                    Icon { icon: FaXmark, width: 10, height: 10 }
                }
            }
        }
    }
}
