use dioxus::prelude::*;

const FIELD_CLASS: &str = "bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none font-[inherit] focus:border-primary-500 focus:shadow-[0_0_0_1px_var(--color-primary-500)] aria-[invalid=true]:border-red-400";

#[component]
pub fn Input(
    oninput: Option<EventHandler<FormEvent>>,
    onkeydown: Option<EventHandler<KeyboardEvent>>,
    onfocus: Option<EventHandler<FocusEvent>>,
    onblur: Option<EventHandler<FocusEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = input)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        input {
            class: FIELD_CLASS,
            oninput: move |e| _ = oninput.map(|handler| handler(e)),
            onkeydown: move |e| _ = onkeydown.map(|handler| handler(e)),
            onfocus: move |e| _ = onfocus.map(|handler| handler(e)),
            onblur: move |e| _ = onblur.map(|handler| handler(e)),
            ..attributes,
        }
    }
}

#[component]
pub fn Textarea(
    oninput: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = textarea)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        textarea {
            class: "{FIELD_CLASS} min-h-24 resize-y",
            oninput: move |e| _ = oninput.map(|handler| handler(e)),
            ..attributes,
        }
    }
}

#[component]
pub fn Label(
    html_for: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        label {
            class: "text-[0.8125rem] font-medium text-neutral-700",
            r#for: html_for,
            ..attributes,
            {children}
        }
    }
}
