use dioxus::prelude::*;
use ui::components::EmptyState;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        EmptyState {
            title: "Page not found",
            message: "Nothing lives at {path}.",
            Link {
                class: "mt-2 text-sm text-primary-600",
                to: Route::Projects { query: String::new() },
                "Browse projects"
            }
        }
    }
}
