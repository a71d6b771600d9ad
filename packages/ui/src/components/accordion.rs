use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::icons::{FaChevronDown, FaChevronUp};
use crate::Icon;

/// Toggle panel `index`. With `multiple == false` opening a panel closes the rest.
pub fn toggle_open(open: &BTreeSet<usize>, index: usize, multiple: bool) -> BTreeSet<usize> {
    if open.contains(&index) {
        let mut next = open.clone();
        next.remove(&index);
        next
    } else if multiple {
        let mut next = open.clone();
        next.insert(index);
        next
    } else {
        BTreeSet::from([index])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccordionItem {
    pub title: String,
    pub body: String,
}

impl AccordionItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[component]
pub fn Accordion(items: Vec<AccordionItem>, #[props(default)] multiple: bool) -> Element {
    let mut open = use_signal(BTreeSet::<usize>::new);

    rsx! {
        div {
            class: "flex flex-col border border-neutral-200 rounded-lg divide-y divide-neutral-200",
            for (i, item) in items.into_iter().enumerate() {
                div {
                    key: "{i}",
                    button {
                        class: "flex items-center justify-between w-full px-4 py-3 bg-transparent border-none text-left text-sm font-medium text-neutral-800 cursor-pointer hover:bg-neutral-50",
                        aria_expanded: "{open().contains(&i)}",
                        onclick: move |_| {
                            let next = toggle_open(&open.peek(), i, multiple);
                            open.set(next);
                        },
                        "{item.title}"
                        if open().contains(&i) {
                            Icon { icon: FaChevronUp, width: 12, height: 12 }
                        } else {
                            Icon { icon: FaChevronDown, width: 12, height: 12 }
                        }
                    }
                    if open().contains(&i) {
                        div { class: "px-4 pb-4 text-sm text-neutral-600", "{item.body}" }
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
    fn test_single_open_closes_others() {
        let open = toggle_open(&BTreeSet::new(), 0, false);
        assert_eq!(open, BTreeSet::from([0]));
        let open = toggle_open(&open, 2, false);
        assert_eq!(open, BTreeSet::from([2]));
        let open = toggle_open(&open, 2, false);
        assert!(open.is_empty());
    }

    #[test]
    fn test_multiple_keeps_others() {
        let open = toggle_open(&BTreeSet::from([0]), 1, true);
        assert_eq!(open, BTreeSet::from([0, 1]));
        let open = toggle_open(&open, 0, true);
        assert_eq!(open, BTreeSet::from([1]));
    }
}
