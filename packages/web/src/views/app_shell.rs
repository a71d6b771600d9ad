use dioxus::prelude::*;
use ui::components::{Footer, Header};
use ui::{use_api, use_auth};

use super::protected::expired_redirect;
use crate::Route;

/// Page chrome shared by every route.
///
/// Also reacts to a session expiring anywhere in the app: cached queries are
/// dropped so public pages refetch without the stale token, and the visitor is
/// sent to login.
#[component]
pub fn AppShell() -> Element {
    let auth = use_auth();
    let mut api = use_api();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let mut current = use_signal(|| route.clone());
    if *current.peek() != route {
        current.set(route);
    }

    // Latches once per expiry so leaving the login page does not bounce back.
    let mut handled = use_signal(|| false);
    use_effect(move || {
        let state = auth();
        if !state.expired {
            handled.set(false);
            return;
        }
        if *handled.peek() {
            return;
        }
        handled.set(true);
        api.reset();
        if let Some(login) = expired_redirect(&state, &current.peek()) {
            tracing::info!(redirect = %login, "Session expired, redirecting to login");
            nav.replace(login);
        }
    });

    rsx! {
        Header {}
        main {
            class: "flex-1 w-full max-w-6xl mx-auto px-6 py-8",
            Outlet::<Route> {}
        }
        Footer {}
    }
}
