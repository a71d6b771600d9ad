use chrono::{Datelike, Utc};
use dioxus::prelude::*;

use crate::icons::FaGithub;
use crate::Icon;

#[component]
pub fn Footer() -> Element {
    let year = Utc::now().year();

    rsx! {
        footer {
            class: "flex flex-wrap items-center justify-between gap-4 px-6 py-6 mt-12 border-t border-neutral-200 text-[0.8125rem] text-neutral-500",
            span { "© {year} ProjectHub. Find a team, build something." }
            div {
                class: "flex items-center gap-4",
                Link { class: "text-neutral-500 no-underline hover:text-neutral-800", to: "/projects", "Browse projects" }
                a {
                    class: "inline-flex items-center gap-1.5 text-neutral-500 no-underline hover:text-neutral-800",
                    href: "https://github.com",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    Icon { icon: FaGithub, width: 14, height: 14 }
                    "GitHub"
                }
            }
        }
    }
}
