use dioxus::prelude::*;

const HERO_CSS: Asset = asset!("/assets/styling/hero.css");

/// Landing banner. `children` are rendered as the call-to-action row.
#[component]
pub fn Hero(title: String, subtitle: String, children: Element) -> Element {
    rsx! {
        document::Stylesheet { href: HERO_CSS }

        section {
            id: "hero",
            class: "flex flex-col items-center text-center gap-4 px-6 py-20",
            h1 { class: "m-0 text-4xl font-bold text-neutral-900", "{title}" }
            p { class: "m-0 max-w-xl text-lg text-neutral-600", "{subtitle}" }
            div { id: "links", class: "flex flex-wrap justify-center gap-3 mt-4", {children} }
        }
    }
}
