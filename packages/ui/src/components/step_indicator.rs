use dioxus::prelude::*;

/// Numbered progress steps. Steps up to `reachable` are clickable.
#[component]
pub fn StepIndicator(
    steps: Vec<String>,
    current: usize,
    #[props(default)] reachable: usize,
    on_select: Option<EventHandler<usize>>,
) -> Element {
    let count = steps.len();

    rsx! {
        ol {
            class: "flex items-center gap-2 p-0 m-0 mb-6 list-none",
            for (i, title) in steps.into_iter().enumerate() {
                li {
                    key: "{i}",
                    class: "flex items-center gap-2",
                    button {
                        class: if i == current {
                            "flex items-center gap-2 px-3 py-1.5 rounded-full border-none text-sm font-medium bg-primary-500 text-white"
                        } else if i < current {
                            "flex items-center gap-2 px-3 py-1.5 rounded-full border-none text-sm bg-primary-100 text-primary-700 cursor-pointer"
                        } else {
                            "flex items-center gap-2 px-3 py-1.5 rounded-full border-none text-sm bg-neutral-100 text-neutral-500"
                        },
                        disabled: i > reachable.max(current),
                        aria_current: if i == current { "step" } else { "false" },
                        onclick: move |_| {
                            if let Some(handler) = &on_select {
                                handler.call(i);
                            }
                        },
                        span { class: "font-semibold", "{i + 1}" }
                        "{title}"
                    }
                    if i + 1 < count {
                        span { class: "w-6 h-px bg-neutral-300" }
                    }
                }
            }
        }
    }
}
