use api::keys;
use chrono::Utc;
use dioxus::prelude::*;
use store::format::{format_date, relative_time};
use store::{Resource, Vacancy};
use ui::components::{
    Button, ButtonVariant, EmptyState, ErrorBanner, Markdown, ModalOverlay, Spinner, StatusBadge,
    TagBadge,
};
use ui::icons::{FaPen, FaTrash};
use ui::{use_api, use_auth, use_notifications, use_query, Icon};

use crate::Route;

#[component]
pub fn ProjectDetail(id: i64) -> Element {
    let mut api = use_api();
    let auth = use_auth();
    let notifications = use_notifications();
    let nav = use_navigator();
    let mut confirm_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let mut project_id = use_signal(|| id);
    if *project_id.peek() != id {
        project_id.set(id);
    }

    let mut project = use_query(
        move || keys::project(project_id()),
        move |client| {
            let id = project_id();
            async move { client.projects().get(id).await }
        },
    );
    let vacancies = use_query(
        move || keys::vacancies(project_id()),
        move |client| {
            let id = project_id();
            async move { client.vacancies().list(id).await }
        },
    );

    let handle_delete = move |_| {
        spawn(async move {
            deleting.set(true);
            match api.client().projects().delete(project_id()).await {
                Ok(()) => {
                    tracing::info!(id = project_id(), "Project deleted");
                    api.invalidate(&[Resource::Projects, Resource::Project, Resource::Dashboard]);
                    notifications.success("Project deleted");
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    deleting.set(false);
                    confirm_delete.set(false);
                    notifications.report_error(&e);
                }
            }
        });
    };

    let Some(result) = project.cloned() else {
        return rsx! { Spinner { label: "Loading project..." } };
    };
    let project_data = match result {
        Ok(p) => p,
        Err(e) => {
            return rsx! {
                ErrorBanner { message: e.to_string(), on_retry: move |_| project.restart() }
            }
        }
    };

    let is_owner = auth()
        .user
        .as_ref()
        .is_some_and(|u| project_data.is_owned_by(u.id));
    let created = format_date(&project_data.created_at);
    let updated = relative_time(&project_data.updated_at, &Utc::now());

    rsx! {
        article {
            class: "flex flex-col gap-6",

            header {
                class: "flex flex-wrap items-start justify-between gap-4",
                div {
                    class: "flex flex-col gap-2",
                    div {
                        class: "flex items-center gap-3",
                        h1 { class: "m-0 text-2xl font-bold text-neutral-800", "{project_data.title}" }
                        StatusBadge { status: project_data.status }
                    }
                    p { class: "m-0 text-neutral-600", "{project_data.short_description}" }
                    p {
                        class: "m-0 text-xs text-neutral-500",
                        "by {project_data.owner.username} · created {created} · updated {updated}"
                    }
                }
                if is_owner {
                    div {
                        class: "flex gap-2",
                        Link {
                            class: "inline-flex items-center gap-2 px-4 py-2 rounded text-sm font-medium bg-white border border-neutral-300 text-neutral-800 no-underline hover:bg-neutral-50",
                            to: Route::ProjectEdit { id: project_data.id },
                            Icon { icon: FaPen, width: 12, height: 12 }
                            "Edit"
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: move |_| confirm_delete.set(true),
                            Icon { icon: FaTrash, width: 12, height: 12 }
                            "Delete"
                        }
                    }
                }
            }

            div {
                class: "flex flex-wrap gap-1.5",
                for tech in project_data.technologies.iter() {
                    TagBadge { key: "tech-{tech.id}", label: tech.name.clone(), active: true }
                }
                for tag in project_data.tags.iter() {
                    TagBadge { key: "tag-{tag.id}", label: tag.name.clone() }
                }
            }

            if let Some(url) = project_data.repository_url.clone() {
                a {
                    class: "text-sm text-primary-600 break-all",
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "{url}"
                }
            }

            section {
                class: "p-5 bg-white border border-neutral-200 rounded-lg",
                Markdown { source: project_data.description.clone() }
            }

            section {
                h2 { class: "m-0 mb-3 text-lg font-semibold text-neutral-800", "Vacancies" }
                match vacancies.cloned() {
                    None => rsx! { Spinner { label: "Loading vacancies..." } },
                    Some(Err(e)) => rsx! { ErrorBanner { message: e.to_string() } },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        EmptyState {
                            title: "No vacancies yet",
                            message: if is_owner { "Add roles from the edit page.".to_string() } else { "Check back later.".to_string() },
                        }
                    },
                    Some(Ok(list)) => rsx! {
                        ul {
                            class: "flex flex-col gap-3 p-0 m-0 list-none",
                            for vacancy in list {
                                VacancyRow { key: "{vacancy.id}", vacancy: vacancy, is_owner: is_owner }
                            }
                        }
                    },
                }
            }
        }

        if confirm_delete() {
            ModalOverlay {
                on_close: move |_| confirm_delete.set(false),
                div {
                    class: "p-6",
                    h2 { class: "m-0 mb-3 text-lg font-semibold text-neutral-800", "Delete project?" }
                    p {
                        class: "m-0 mb-5 text-sm text-neutral-600",
                        "\"{project_data.title}\" and all of its vacancies and applications will be removed."
                    }
                    div {
                        class: "flex gap-2",
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: deleting(),
                            onclick: handle_delete,
                            if deleting() { "Deleting..." } else { "Delete" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| confirm_delete.set(false),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn VacancyRow(vacancy: Vacancy, is_owner: bool) -> Element {
    rsx! {
        li {
            class: "flex flex-wrap items-center justify-between gap-3 p-4 bg-white border border-neutral-200 rounded-lg",
            div {
                class: "flex flex-col gap-1",
                Link {
                    class: "text-base font-medium text-neutral-800 no-underline hover:underline",
                    to: Route::VacancyDetail { id: vacancy.id },
                    "{vacancy.title}"
                }
                div {
                    class: "flex flex-wrap gap-1.5",
                    for tech in vacancy.technologies.iter() {
                        TagBadge { key: "{tech.id}", label: tech.name.clone() }
                    }
                }
            }
            div {
                class: "flex items-center gap-3 text-sm",
                if vacancy.is_open {
                    span { class: "text-green-700", "Open" }
                } else {
                    span { class: "text-neutral-500", "Closed" }
                }
                if is_owner {
                    Link {
                        class: "text-primary-600",
                        to: Route::VacancyResponses { id: vacancy.id },
                        "Applications"
                    }
                }
            }
        }
    }
}
