use chrono::Utc;
use dioxus::prelude::*;
use store::format::{pluralize, relative_time, truncate};
use store::{Project, ProjectStatus};

use super::TagBadge;

const SUMMARY_LEN: usize = 160;

#[component]
pub fn StatusBadge(status: ProjectStatus) -> Element {
    let class = match status {
        ProjectStatus::Active => "bg-green-50 text-green-700 border-green-200",
        ProjectStatus::Draft => "bg-neutral-100 text-neutral-600 border-neutral-200",
        ProjectStatus::Completed => "bg-blue-50 text-blue-700 border-blue-200",
        ProjectStatus::Archived => "bg-amber-50 text-amber-700 border-amber-200",
    };

    rsx! {
        span {
            class: "inline-flex px-2 py-0.5 rounded text-[0.6875rem] font-medium uppercase tracking-wide border {class}",
            "{status.label()}"
        }
    }
}

/// Summary card linking to the project page.
#[component]
pub fn ProjectCard(project: Project) -> Element {
    let summary = if project.short_description.is_empty() {
        truncate(&project.description, SUMMARY_LEN)
    } else {
        truncate(&project.short_description, SUMMARY_LEN)
    };
    let vacancies = pluralize(project.open_vacancies as i64, "open role", "open roles");
    let updated = relative_time(&project.updated_at, &Utc::now());

    rsx! {
        Link {
            class: "flex flex-col gap-3 p-5 bg-white border border-neutral-200 rounded-lg no-underline text-inherit transition-shadow hover:shadow-md",
            to: "/projects/{project.id}",
            div {
                class: "flex items-start justify-between gap-2",
                h3 { class: "m-0 text-base font-semibold text-neutral-800", "{project.title}" }
                StatusBadge { status: project.status }
            }
            p { class: "m-0 text-sm text-neutral-600", "{summary}" }
            if !project.tags.is_empty() || !project.technologies.is_empty() {
                div {
                    class: "flex flex-wrap gap-1.5",
                    for tech in project.technologies.iter() {
                        TagBadge { key: "tech-{tech.id}", label: tech.name.clone(), active: true }
                    }
                    for tag in project.tags.iter() {
                        TagBadge { key: "tag-{tag.id}", label: tag.name.clone() }
                    }
                }
            }
            div {
                class: "flex items-center justify-between mt-auto text-xs text-neutral-500",
                span { "by {project.owner.username}" }
                span { "{vacancies} · updated {updated}" }
            }
        }
    }
}
