//! Catalog picker with server-side search and a chip list of selections.

use std::collections::BTreeSet;

use api::{keys, ApiError};
use dioxus::prelude::*;
use store::debounce::Debouncer;
use store::models::Id;
use store::search::{rank_suggestions, Suggestion};
use store::{Tag, Technology};

use super::slider::wrap_index;
use super::{Input, TagBadge};
use crate::api_context::{use_api, Api};
use crate::notifications::use_notifications;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    Tags,
    Technologies,
}

impl CatalogKind {
    async fn search(self, api: Api, query: String) -> Result<Vec<CatalogItem>, ApiError> {
        let client = api.client();
        let queries = api.queries();
        match self {
            CatalogKind::Tags => {
                let tags: Vec<Tag> = queries
                    .fetch(keys::tags(Some(query.as_str())), move || async move {
                        client.catalog().tags(Some(query.as_str())).await
                    })
                    .await?;
                Ok(tags.into_iter().map(CatalogItem::from).collect())
            }
            CatalogKind::Technologies => {
                let technologies: Vec<Technology> = queries
                    .fetch(keys::technologies(Some(query.as_str())), move || async move {
                        client.catalog().technologies(Some(query.as_str())).await
                    })
                    .await?;
                Ok(technologies.into_iter().map(CatalogItem::from).collect())
            }
        }
    }
}

/// A tag or technology as shown in the picker.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: Id,
    pub name: String,
}

impl From<Tag> for CatalogItem {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

impl From<Technology> for CatalogItem {
    fn from(technology: Technology) -> Self {
        Self {
            id: technology.id,
            name: technology.name,
        }
    }
}

impl Suggestion for CatalogItem {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[component]
pub fn Autocomplete(
    kind: CatalogKind,
    selected: Vec<CatalogItem>,
    on_add: EventHandler<CatalogItem>,
    on_remove: EventHandler<Id>,
    #[props(default)] placeholder: String,
    #[props(default)] id: String,
) -> Element {
    let api = use_api();
    let notifications = use_notifications();
    let mut text = use_signal(String::new);
    let mut debouncer = use_signal(Debouncer::new);
    let mut suggestions = use_signal(Vec::<CatalogItem>::new);
    let mut highlighted = use_signal(|| 0usize);
    let mut loading = use_signal(|| false);

    let exclude: BTreeSet<Id> = selected.iter().map(|item| item.id).collect();

    let mut pick = move |item: CatalogItem| {
        debouncer.write().cancel();
        text.set(String::new());
        suggestions.set(Vec::new());
        highlighted.set(0);
        on_add.call(item);
    };

    let handle_input = move |evt: FormEvent| {
        let value = evt.value();
        text.set(value.clone());
        let ticket = debouncer.write().schedule();
        let exclude = exclude.clone();
        let config = api.config().search;

        spawn(async move {
            api::runtime::sleep(config.debounce()).await;
            if !debouncer.peek().is_current(ticket) {
                return;
            }
            let query = value.trim().to_string();
            if query.chars().count() < config.min_chars {
                suggestions.set(Vec::new());
                return;
            }

            loading.set(true);
            match kind.search(api, query.clone()).await {
                Ok(items) => {
                    if debouncer.peek().is_current(ticket) {
                        let ranked = rank_suggestions(&items, &query, &exclude, config.max_suggestions);
                        tracing::debug!(query = %query, matches = ranked.len(), "Catalog search");
                        suggestions.set(ranked);
                        highlighted.set(0);
                    }
                }
                Err(e) => notifications.report_error(&e),
            }
            loading.set(false);
        });
    };

    let handle_key = move |evt: KeyboardEvent| {
        let len = suggestions.peek().len();
        match evt.key() {
            Key::ArrowDown if len > 0 => {
                evt.prevent_default();
                highlighted.set(wrap_index(highlighted(), 1, len));
            }
            Key::ArrowUp if len > 0 => {
                evt.prevent_default();
                highlighted.set(wrap_index(highlighted(), -1, len));
            }
            Key::Enter => {
                evt.prevent_default();
                let item = suggestions.peek().get(highlighted()).cloned();
                if let Some(item) = item {
                    pick(item);
                }
            }
            Key::Escape => {
                debouncer.write().cancel();
                suggestions.set(Vec::new());
            }
            _ => {}
        }
    };

    rsx! {
        div {
            class: "relative flex flex-col gap-2",
            if !selected.is_empty() {
                div {
                    class: "flex flex-wrap gap-1.5",
                    for item in selected.iter().cloned() {
                        TagBadge {
                            key: "{item.id}",
                            label: item.name.clone(),
                            active: true,
                            on_remove: move |_| on_remove.call(item.id),
                        }
                    }
                }
            }
            Input {
                id: "{id}",
                r#type: "text",
                autocomplete: "off",
                placeholder: "{placeholder}",
                value: text(),
                oninput: handle_input,
                onkeydown: handle_key,
            }
            if loading() {
                span { class: "absolute right-3 top-2 text-xs text-neutral-400", "Searching..." }
            }
            if !suggestions().is_empty() {
                ul {
                    class: "absolute top-full left-0 right-0 z-40 mt-1 p-1 list-none bg-white border border-neutral-200 rounded shadow-lg",
                    role: "listbox",
                    for (i, item) in suggestions().into_iter().enumerate() {
                        li {
                            key: "{item.id}",
                            class: if i == highlighted() { "px-3 py-1.5 rounded text-sm cursor-pointer bg-primary-50 text-primary-700" } else { "px-3 py-1.5 rounded text-sm cursor-pointer text-neutral-700 hover:bg-neutral-50" },
                            role: "option",
                            aria_selected: "{i == highlighted()}",
                            onmouseenter: move |_| highlighted.set(i),
                            onclick: move |_| {
                                let item = suggestions.peek().get(i).cloned();
                                if let Some(item) = item {
                                    pick(item);
                                }
                            },
                            "{item.name}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_items_are_not_suggested() {
        let items = vec![
            CatalogItem { id: 1, name: "Rust".into() },
            CatalogItem { id: 2, name: "Rust Analyzer".into() },
            CatalogItem { id: 3, name: "TypeScript".into() },
        ];
        let exclude = BTreeSet::from([1]);
        let ranked = rank_suggestions(&items, "rust", &exclude, 5);
        assert_eq!(ranked, vec![CatalogItem { id: 2, name: "Rust Analyzer".into() }]);
    }
}
