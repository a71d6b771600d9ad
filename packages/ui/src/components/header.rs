use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::{FaGauge, FaMagnifyingGlass, FaUser};
use crate::{Icon, LogoutButton};

const NAV_LINK: &str = "inline-flex items-center gap-1.5 px-3 py-1.5 rounded text-sm text-neutral-600 no-underline hover:bg-neutral-100 hover:text-neutral-800";

/// Top navigation bar. Links adapt to the session state.
#[component]
pub fn Header() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    rsx! {
        header {
            class: "sticky top-0 z-50 flex items-center justify-between gap-4 px-6 h-14 bg-white border-b border-neutral-200",
            Link {
                class: "text-lg font-bold text-neutral-800 no-underline",
                to: "/",
                "ProjectHub"
            }
            nav {
                class: "flex items-center gap-1",
                Link {
                    class: NAV_LINK,
                    to: "/projects",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    "Projects"
                }
                if let Some(user) = state.user.as_ref() {
                    Link {
                        class: NAV_LINK,
                        to: "/dashboard",
                        Icon { icon: FaGauge, width: 14, height: 14 }
                        "Dashboard"
                    }
                    Link {
                        class: NAV_LINK,
                        to: "/profile",
                        span {
                            title: "{user.display_name()}",
                            class: "inline-flex items-center justify-center w-6 h-6 rounded-full bg-primary-100 text-primary-700 text-[0.6875rem] font-semibold",
                            "{user.initials()}"
                        }
                    }
                    LogoutButton {
                        class: NAV_LINK,
                        on_done: move |_| {
                            nav.push("/");
                        },
                    }
                } else if !state.loading {
                    Link {
                        class: NAV_LINK,
                        to: "/login",
                        Icon { icon: FaUser, width: 14, height: 14 }
                        "Sign in"
                    }
                    Link {
                        class: "inline-flex items-center px-3 py-1.5 rounded text-sm font-medium bg-primary-500 text-white no-underline hover:bg-primary-600",
                        to: "/register",
                        "Join"
                    }
                }
            }
        }
    }
}
