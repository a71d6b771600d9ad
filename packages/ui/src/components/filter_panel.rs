use dioxus::prelude::*;
use store::filter::{ProjectFilter, ProjectSort};
use store::{ProjectStatus, Tag, Technology};

use super::{Input, Label, TagBadge};
use crate::icons::{FaFilter, FaRotateLeft};
use crate::Icon;

const SELECT_CLASS: &str = "w-full bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none font-[inherit] focus:border-primary-500";

/// Sidebar controls bound to a [`ProjectFilter`] signal.
#[component]
pub fn FilterPanel(
    filter: Signal<ProjectFilter>,
    tags: Vec<Tag>,
    technologies: Vec<Technology>,
    result_count: usize,
) -> Element {
    let mut filter = filter;
    let current = filter();

    rsx! {
        aside {
            class: "flex flex-col gap-4 p-4 bg-white border border-neutral-200 rounded-lg",
            div {
                class: "flex items-center justify-between",
                span {
                    class: "inline-flex items-center gap-2 text-sm font-semibold text-neutral-800",
                    Icon { icon: FaFilter, width: 12, height: 12 }
                    "Filters"
                }
                if !current.is_empty() {
                    button {
                        class: "inline-flex items-center gap-1 bg-transparent border-none text-xs text-neutral-500 cursor-pointer hover:text-neutral-800",
                        onclick: move |_| filter.write().clear(),
                        Icon { icon: FaRotateLeft, width: 10, height: 10 }
                        "Reset"
                    }
                }
            }

            div {
                class: "flex flex-col gap-1.5",
                Label { html_for: "filter-search", "Search" }
                Input {
                    id: "filter-search",
                    r#type: "search",
                    placeholder: "Title, description or tag",
                    value: current.search.clone(),
                    oninput: move |evt: FormEvent| filter.write().search = evt.value(),
                }
            }

            div {
                class: "flex flex-col gap-1.5",
                Label { html_for: "filter-status", "Status" }
                select {
                    id: "filter-status",
                    class: SELECT_CLASS,
                    value: current.status.map(|s| s.as_str()).unwrap_or(""),
                    onchange: move |evt| filter.write().status = ProjectStatus::parse(&evt.value()),
                    option { value: "", "Any status" }
                    for status in ProjectStatus::ALL {
                        option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
                    }
                }
            }

            label {
                class: "flex items-center gap-2 text-sm text-neutral-700 cursor-pointer",
                input {
                    r#type: "checkbox",
                    checked: current.only_open,
                    onchange: move |evt| filter.write().only_open = evt.checked(),
                }
                "Only projects with open roles"
            }

            div {
                class: "flex flex-col gap-1.5",
                Label { html_for: "filter-sort", "Sort by" }
                select {
                    id: "filter-sort",
                    class: SELECT_CLASS,
                    value: current.sort.as_str(),
                    onchange: move |evt| filter.write().sort = ProjectSort::parse(&evt.value()).unwrap_or_default(),
                    for sort in ProjectSort::ALL {
                        option { key: "{sort.as_str()}", value: sort.as_str(), "{sort.label()}" }
                    }
                }
            }

            if !technologies.is_empty() {
                div {
                    class: "flex flex-col gap-1.5",
                    span { class: "text-[0.8125rem] font-medium text-neutral-700", "Technologies (any)" }
                    div {
                        class: "flex flex-wrap gap-1.5",
                        for tech in technologies.iter() {
                            TagBadge {
                                key: "{tech.id}",
                                label: tech.name.clone(),
                                active: current.technologies.contains(&tech.id),
                                onclick: {
                                    let id = tech.id;
                                    move |_| filter.write().toggle_technology(id)
                                },
                            }
                        }
                    }
                }
            }

            if !tags.is_empty() {
                div {
                    class: "flex flex-col gap-1.5",
                    span { class: "text-[0.8125rem] font-medium text-neutral-700", "Tags (all)" }
                    div {
                        class: "flex flex-wrap gap-1.5",
                        for tag in tags.iter() {
                            TagBadge {
                                key: "{tag.id}",
                                label: tag.name.clone(),
                                active: current.tags.contains(&tag.id),
                                onclick: {
                                    let id = tag.id;
                                    move |_| filter.write().toggle_tag(id)
                                },
                            }
                        }
                    }
                }
            }

            p { class: "m-0 text-xs text-neutral-500", "{result_count} matching" }
        }
    }
}
