//! Signed-in home: configurable widgets over the `dashboard/*` endpoints.

use api::keys;
use chrono::Utc;
use dioxus::prelude::*;
use store::format::{pluralize, relative_time};
use store::{ResponseStatus, VacancyResponse, Widget};
use ui::components::{Button, ButtonVariant, EmptyState, ErrorBanner, ProjectCard, Spinner};
use ui::icons::{FaArrowDown, FaArrowUp, FaEye, FaEyeSlash, FaPlus, FaSliders};
use ui::{use_auth, use_dashboard, use_query, Icon};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let prefs = use_dashboard();
    let mut customizing = use_signal(|| false);

    let name = auth()
        .user
        .map(|u| u.display_name())
        .unwrap_or_default();
    let visible = prefs().visible();

    rsx! {
        div {
            class: "flex flex-wrap items-center justify-between gap-4 mb-6",
            div {
                h1 { class: "m-0 text-2xl font-bold text-neutral-800", "Dashboard" }
                p { class: "m-0 mt-1 text-sm text-neutral-500", "Signed in as {name}" }
            }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| customizing.toggle(),
                Icon { icon: FaSliders, width: 12, height: 12 }
                if customizing() { "Done" } else { "Customize" }
            }
        }

        if customizing() {
            CustomizePanel {}
        }

        if visible.is_empty() {
            EmptyState {
                title: "Every widget is hidden",
                message: "Use Customize to bring some back.",
            }
        }

        div {
            class: "flex flex-col gap-6",
            for widget in visible {
                WidgetFrame { key: "{widget.title()}", widget: widget }
            }
        }
    }
}

#[component]
fn CustomizePanel() -> Element {
    let mut prefs = use_dashboard();
    let order = prefs().order.clone();
    let last = order.len().saturating_sub(1);

    rsx! {
        section {
            class: "mb-6 p-4 bg-white border border-neutral-200 rounded-lg",
            div {
                class: "flex items-center justify-between mb-3",
                h2 { class: "m-0 text-sm font-semibold text-neutral-800", "Widgets" }
                button {
                    class: "bg-transparent border-none text-xs text-neutral-500 cursor-pointer hover:text-neutral-800",
                    onclick: move |_| prefs.write().reset(),
                    "Reset layout"
                }
            }
            ul {
                class: "flex flex-col gap-1 p-0 m-0 list-none",
                for (i, widget) in order.into_iter().enumerate() {
                    li {
                        key: "{widget.title()}",
                        class: "flex items-center justify-between gap-2 px-2 py-1.5 rounded hover:bg-neutral-50",
                        span {
                            class: if prefs().is_hidden(widget) { "text-sm text-neutral-400 line-through" } else { "text-sm text-neutral-700" },
                            "{widget.title()}"
                        }
                        div {
                            class: "flex items-center gap-1",
                            button {
                                class: "p-1 bg-transparent border-none text-neutral-500 cursor-pointer disabled:opacity-30",
                                title: "Move up",
                                disabled: i == 0,
                                onclick: move |_| prefs.write().move_up(widget),
                                Icon { icon: FaArrowUp, width: 12, height: 12 }
                            }
                            button {
                                class: "p-1 bg-transparent border-none text-neutral-500 cursor-pointer disabled:opacity-30",
                                title: "Move down",
                                disabled: i == last,
                                onclick: move |_| prefs.write().move_down(widget),
                                Icon { icon: FaArrowDown, width: 12, height: 12 }
                            }
                            button {
                                class: "p-1 bg-transparent border-none text-neutral-500 cursor-pointer",
                                title: if prefs().is_hidden(widget) { "Show" } else { "Hide" },
                                onclick: move |_| prefs.write().toggle(widget),
                                if prefs().is_hidden(widget) {
                                    Icon { icon: FaEyeSlash, width: 12, height: 12 }
                                } else {
                                    Icon { icon: FaEye, width: 12, height: 12 }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn WidgetFrame(widget: Widget) -> Element {
    rsx! {
        section {
            class: "p-5 bg-white border border-neutral-200 rounded-lg",
            h2 { class: "m-0 mb-4 text-base font-semibold text-neutral-800", "{widget.title()}" }
            match widget {
                Widget::Stats => rsx! { StatsWidget {} },
                Widget::QuickActions => rsx! { QuickActionsWidget {} },
                Widget::MyProjects => rsx! { MyProjectsWidget {} },
                Widget::ReceivedResponses => rsx! { ReceivedResponsesWidget {} },
                Widget::SentResponses => rsx! { SentResponsesWidget {} },
            }
        }
    }
}

#[component]
fn StatsWidget() -> Element {
    let stats = use_query(keys::dashboard_stats, |client| async move {
        client.dashboard().stats().await
    });

    match stats.cloned() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: e.to_string() } },
        Some(Ok(stats)) => {
            let tiles = [
                ("Projects", stats.projects),
                ("Open vacancies", stats.open_vacancies),
                ("Applications received", stats.responses_received),
                ("Awaiting review", stats.pending_responses),
                ("Applications sent", stats.responses_sent),
            ];
            rsx! {
                div {
                    class: "grid gap-3 grid-cols-2 md:grid-cols-5",
                    for (label, value) in tiles {
                        div {
                            key: "{label}",
                            class: "flex flex-col gap-1 p-3 rounded bg-neutral-50",
                            span { class: "text-2xl font-bold text-neutral-800", "{value}" }
                            span { class: "text-xs text-neutral-500", "{label}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuickActionsWidget() -> Element {
    rsx! {
        div {
            class: "flex flex-wrap gap-2",
            Link {
                class: "inline-flex items-center gap-2 px-4 py-2 rounded text-sm font-medium bg-primary-500 text-white no-underline hover:bg-primary-600",
                to: Route::ProjectCreate {},
                Icon { icon: FaPlus, width: 12, height: 12 }
                "New project"
            }
            Link {
                class: "inline-flex items-center px-4 py-2 rounded text-sm font-medium bg-white border border-neutral-300 text-neutral-800 no-underline hover:bg-neutral-50",
                to: Route::Projects { query: "open=1".to_string() },
                "Find a team"
            }
            Link {
                class: "inline-flex items-center px-4 py-2 rounded text-sm font-medium bg-white border border-neutral-300 text-neutral-800 no-underline hover:bg-neutral-50",
                to: Route::Profile {},
                "Edit profile"
            }
        }
    }
}

#[component]
fn MyProjectsWidget() -> Element {
    let projects = use_query(keys::dashboard_projects, |client| async move {
        client.dashboard().projects().await
    });

    match projects.cloned() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: e.to_string() } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            EmptyState {
                title: "No projects yet",
                Link { class: "text-sm text-primary-600", to: Route::ProjectCreate {}, "Publish your first project" }
            }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "grid gap-4 grid-cols-1 md:grid-cols-2",
                for project in list {
                    ProjectCard { key: "{project.id}", project: project }
                }
            }
        },
    }
}

#[component]
fn ReceivedResponsesWidget() -> Element {
    let responses = use_query(keys::dashboard_responses, |client| async move {
        client.dashboard().responses().await
    });

    match responses.cloned() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: e.to_string() } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "m-0 text-sm text-neutral-500", "Nobody has applied to your vacancies yet." }
        },
        Some(Ok(list)) => {
            let pending = list
                .iter()
                .filter(|r| r.status == ResponseStatus::Pending)
                .count();
            rsx! {
                p {
                    class: "m-0 mb-3 text-sm text-neutral-600",
                    "{pluralize(pending as i64, \"application\", \"applications\")} awaiting review"
                }
                ResponseList { responses: list, link_to_review: true }
            }
        }
    }
}

#[component]
fn SentResponsesWidget() -> Element {
    let responses = use_query(keys::my_responses, |client| async move {
        client.vacancies().my_responses().await
    });

    match responses.cloned() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: e.to_string() } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p {
                class: "m-0 text-sm text-neutral-500",
                "You have not applied anywhere yet. "
                Link { class: "text-primary-600", to: Route::Projects { query: "open=1".to_string() }, "Browse open roles" }
            }
        },
        Some(Ok(list)) => rsx! {
            ResponseList { responses: list, link_to_review: false }
        },
    }
}

#[component]
fn ResponseList(responses: Vec<VacancyResponse>, link_to_review: bool) -> Element {
    let now = Utc::now();

    rsx! {
        ul {
            class: "flex flex-col divide-y divide-neutral-100 p-0 m-0 list-none",
            for response in responses {
                li {
                    key: "{response.id}",
                    class: "flex items-center justify-between gap-3 py-2 text-sm",
                    if link_to_review {
                        Link {
                            class: "text-neutral-800",
                            to: Route::VacancyResponses { id: response.vacancy_id },
                            "{response.applicant.username}"
                        }
                    } else {
                        Link {
                            class: "text-neutral-800",
                            to: Route::VacancyDetail { id: response.vacancy_id },
                            "Vacancy #{response.vacancy_id}"
                        }
                    }
                    span { class: "text-xs text-neutral-500", {relative_time(&response.created_at, &now)} }
                    ResponseStatusBadge { status: response.status }
                }
            }
        }
    }
}

#[component]
pub(crate) fn ResponseStatusBadge(status: ResponseStatus) -> Element {
    let class = match status {
        ResponseStatus::Pending => "bg-amber-50 text-amber-700",
        ResponseStatus::Accepted => "bg-green-50 text-green-700",
        ResponseStatus::Rejected => "bg-neutral-100 text-neutral-500",
    };

    rsx! {
        span { class: "px-2 py-0.5 rounded text-xs font-medium {class}", "{status.label()}" }
    }
}
