//! Project browser. The filter state lives in the query string so results can be
//! shared and survive a reload.

use api::{keys, ProjectQuery};
use dioxus::prelude::*;
use store::filter::ProjectFilter;
use ui::components::{EmptyState, ErrorBanner, FilterPanel, ProjectCard, Spinner};
use ui::use_query;

use crate::Route;

#[component]
pub fn Projects(query: String) -> Element {
    let nav = use_navigator();
    let mut filter = use_signal(|| ProjectFilter::from_query(&query));
    // Filter as last seen in the URL
    let mut synced = use_signal(|| ProjectFilter::from_query(&query));

    // Back/forward navigation
    let from_url = ProjectFilter::from_query(&query);
    if *synced.peek() != from_url {
        synced.set(from_url.clone());
        filter.set(from_url);
    }

    use_effect(move || {
        let current = filter();
        if current != *synced.peek() {
            synced.set(current.clone());
            nav.replace(Route::Projects {
                query: current.to_query(),
            });
        }
    });

    let mut projects = use_query(
        || keys::projects(&ProjectQuery::default()),
        |client| async move { client.projects().list(&ProjectQuery::default()).await },
    );
    let tags = use_query(
        || keys::tags(None),
        |client| async move { client.catalog().tags(None).await },
    );
    let technologies = use_query(
        || keys::technologies(None),
        |client| async move { client.catalog().technologies(None).await },
    );

    let tags = tags.cloned().and_then(Result::ok).unwrap_or_default();
    let technologies = technologies.cloned().and_then(Result::ok).unwrap_or_default();
    let results = projects
        .cloned()
        .map(|result| result.map(|all| filter.read().apply(&all)));
    let count = match &results {
        Some(Ok(list)) => list.len(),
        _ => 0,
    };

    rsx! {
        div {
            class: "flex items-baseline justify-between mb-6",
            h1 { class: "m-0 text-2xl font-bold text-neutral-800", "Projects" }
            Link {
                class: "text-sm text-primary-600",
                to: Route::ProjectCreate {},
                "Publish a project"
            }
        }

        div {
            class: "grid gap-6 grid-cols-1 lg:grid-cols-[260px_1fr]",
            FilterPanel {
                filter: filter,
                tags: tags,
                technologies: technologies,
                result_count: count,
            }
            div {
                match results {
                    None => rsx! { Spinner { label: "Loading projects..." } },
                    Some(Err(e)) => rsx! {
                        ErrorBanner {
                            message: e.to_string(),
                            on_retry: move |_| projects.restart(),
                        }
                    },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        EmptyState {
                            title: "No projects match",
                            message: "Try removing a filter or searching for something broader.",
                            button {
                                class: "mt-2 px-3 py-1.5 rounded border border-neutral-300 bg-white text-sm cursor-pointer hover:bg-neutral-50",
                                onclick: move |_| filter.write().clear(),
                                "Clear filters"
                            }
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
        }
    }
}
