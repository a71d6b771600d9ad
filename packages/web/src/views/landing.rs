use api::{keys, ProjectQuery};
use dioxus::prelude::*;
use store::ProjectStatus;
use ui::components::{
    Accordion, AccordionItem, ErrorBanner, Hero, ProjectCard, Slide, Slider, Spinner,
};
use ui::{use_auth, use_query};

use crate::Route;

const FEATURED: usize = 6;

fn slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "Publish your idea",
            "Describe the project, pick its stack and open the roles you need filled.",
        ),
        Slide::new(
            "Find people who fit",
            "Screening questions on every vacancy tell you who is a match before the first call.",
        ),
        Slide::new(
            "Join something real",
            "Filter by technology and tags, then apply with a cover letter in minutes.",
        ),
    ]
}

fn faq() -> Vec<AccordionItem> {
    vec![
        AccordionItem::new(
            "Is ProjectHub free?",
            "Yes. Publishing projects and applying to vacancies costs nothing.",
        ),
        AccordionItem::new(
            "Who can open a vacancy?",
            "Any signed-in user can create a project and add vacancies to it from the dashboard.",
        ),
        AccordionItem::new(
            "How do I hear back about an application?",
            "The project owner accepts or rejects it; the status shows up on your dashboard.",
        ),
    ]
}

#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let mut featured = use_query(
        || keys::projects(&ProjectQuery::default().status(ProjectStatus::Active)),
        |client| async move {
            client
                .projects()
                .list(&ProjectQuery::default().status(ProjectStatus::Active))
                .await
        },
    );

    let signed_in = auth().is_authenticated();

    rsx! {
        Hero {
            title: "Build with the right team",
            subtitle: "ProjectHub connects people with ideas to people with the skills to ship them.",
            Link {
                class: "px-5 py-2.5 rounded bg-primary-500 text-white text-sm font-medium hover:bg-primary-600",
                to: Route::Projects { query: String::new() },
                "Browse projects"
            }
            if signed_in {
                Link {
                    class: "px-5 py-2.5 rounded bg-white border border-neutral-300 text-neutral-800 text-sm font-medium hover:bg-neutral-50",
                    to: Route::ProjectCreate {},
                    "Start a project"
                }
            } else {
                Link {
                    class: "px-5 py-2.5 rounded bg-white border border-neutral-300 text-neutral-800 text-sm font-medium hover:bg-neutral-50",
                    to: Route::Register {},
                    "Create an account"
                }
            }
        }

        Slider { slides: slides() }

        section {
            class: "mt-12",
            div {
                class: "flex items-center justify-between mb-4",
                h2 { class: "m-0 text-xl font-semibold text-neutral-800", "Looking for people" }
                Link {
                    class: "text-sm text-primary-600",
                    to: Route::Projects { query: "open=1".to_string() },
                    "See all"
                }
            }
            match featured.cloned() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    ErrorBanner {
                        message: e.to_string(),
                        on_retry: move |_| featured.restart(),
                    }
                },
                Some(Ok(projects)) => rsx! {
                    div {
                        class: "grid gap-4 grid-cols-1 md:grid-cols-2 lg:grid-cols-3",
                        for project in projects.into_iter().filter(|p| p.open_vacancies > 0).take(FEATURED) {
                            ProjectCard { key: "{project.id}", project: project }
                        }
                    }
                },
            }
        }

        section {
            class: "mt-12 max-w-3xl mx-auto",
            h2 { class: "m-0 mb-4 text-xl font-semibold text-neutral-800", "Questions" }
            Accordion { items: faq() }
        }
    }
}
