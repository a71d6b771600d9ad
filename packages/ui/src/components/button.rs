use dioxus::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Destructive,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-primary-500 text-white hover:bg-primary-600",
            ButtonVariant::Secondary => "bg-neutral-100 text-neutral-800 hover:bg-neutral-200",
            ButtonVariant::Outline => {
                "bg-white border border-neutral-300 text-neutral-800 hover:bg-neutral-50"
            }
            ButtonVariant::Ghost => "bg-transparent text-neutral-600 hover:bg-neutral-100",
            ButtonVariant::Destructive => "bg-red-600 text-white hover:bg-red-700",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(extends = GlobalAttributes)]
    #[props(extends = button)]
    attributes: Vec<Attribute>,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "inline-flex items-center justify-center gap-2 px-4 py-2 rounded text-sm font-medium cursor-pointer transition-colors duration-150 disabled:opacity-50 disabled:cursor-not-allowed {variant.class()}",
            onclick: move |event| {
                if let Some(handler) = &onclick {
                    handler.call(event);
                }
            },
            ..attributes,
            {children}
        }
    }
}
