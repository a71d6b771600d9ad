//! Auto-advancing carousel used on the landing page.

use std::time::Duration;

use dioxus::prelude::*;

use crate::icons::{FaChevronLeft, FaChevronRight};
use crate::Icon;

/// Move `current` by `delta` positions within `0..len`, wrapping at both ends.
pub fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (current as isize + delta).rem_euclid(len) as usize
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub title: String,
    pub body: String,
}

impl Slide {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Carousel. Autoplay pauses while the pointer is over it; `interval_ms: 0`
/// disables it.
#[component]
pub fn Slider(slides: Vec<Slide>, #[props(default = 6000)] interval_ms: u64) -> Element {
    let mut current = use_signal(|| 0usize);
    let mut paused = use_signal(|| false);
    let len = slides.len();

    use_future(move || async move {
        if interval_ms == 0 {
            return;
        }
        loop {
            api::runtime::sleep(Duration::from_millis(interval_ms)).await;
            if !*paused.peek() {
                let next = wrap_index(*current.peek(), 1, len);
                current.set(next);
            }
        }
    });

    let Some(slide) = slides.get(current().min(len.saturating_sub(1))).cloned() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "relative flex items-center gap-4 max-w-3xl mx-auto px-4 py-8 rounded-lg bg-neutral-50 border border-neutral-200",
            onmouseenter: move |_| paused.set(true),
            onmouseleave: move |_| paused.set(false),
            button {
                class: "p-2 bg-transparent border-none cursor-pointer text-neutral-500 hover:text-neutral-800",
                title: "Previous",
                onclick: move |_| current.set(wrap_index(current(), -1, len)),
                Icon { icon: FaChevronLeft, width: 16, height: 16 }
            }
            div {
                class: "flex-1 text-center",
                h3 { class: "m-0 mb-2 text-xl font-semibold text-neutral-800", "{slide.title}" }
                p { class: "m-0 text-neutral-600", "{slide.body}" }
                div {
                    class: "flex justify-center gap-1.5 mt-4",
                    for i in 0..len {
                        button {
                            key: "{i}",
                            class: if i == current() { "w-2 h-2 rounded-full border-none bg-primary-500" } else { "w-2 h-2 rounded-full border-none bg-neutral-300 cursor-pointer" },
                            title: "Slide {i + 1}",
                            onclick: move |_| current.set(i),
                        }
                    }
                }
            }
            button {
                class: "p-2 bg-transparent border-none cursor-pointer text-neutral-500 hover:text-neutral-800",
                title: "Next",
                onclick: move |_| current.set(wrap_index(current(), 1, len)),
                Icon { icon: FaChevronRight, width: 16, height: 16 }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_forward_and_back() {
        assert_eq!(wrap_index(0, 1, 3), 1);
        assert_eq!(wrap_index(2, 1, 3), 0);
        assert_eq!(wrap_index(0, -1, 3), 2);
        assert_eq!(wrap_index(1, -4, 3), 0);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_index(0, 1, 0), 0);
        assert_eq!(wrap_index(5, -1, 0), 0);
    }
}
