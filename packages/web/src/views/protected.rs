use dioxus::prelude::*;
use ui::components::Spinner;
use ui::{use_auth, AuthState};

use crate::Route;

fn login_for(route: &Route) -> Route {
    Route::Login {
        redirect: route.to_string(),
    }
}

/// Where a visitor to a signed-in page must go instead, if anywhere.
/// Nothing is decided while the session is still being restored.
pub(crate) fn guard(state: &AuthState, route: &Route) -> Option<Route> {
    if state.loading || state.user.is_some() {
        return None;
    }
    Some(login_for(route))
}

/// Where to send a visitor whose session just expired. Pages that already
/// sign the visitor in stay put.
pub(crate) fn expired_redirect(state: &AuthState, route: &Route) -> Option<Route> {
    if !state.expired || state.user.is_some() {
        return None;
    }
    match route {
        Route::Login { .. } | Route::Register {} => None,
        _ => Some(login_for(route)),
    }
}

/// Guard for signed-in pages. Visitors without a session, or whose session
/// expired, are sent to the login page with a way back.
#[component]
pub fn Protected() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = auth();
    if state.loading {
        return rsx! {
            Spinner { label: "Checking your session..." }
        };
    }

    if let Some(login) = guard(&state, &route) {
        tracing::debug!(redirect = %login, expired = state.expired, "Redirecting to login");
        nav.replace(login);
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::User;

    fn user() -> User {
        User {
            id: 1,
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            avatar_url: None,
            bio: None,
            skills: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    fn expired() -> AuthState {
        let mut state = AuthState::signed_in(user());
        state.expire();
        state
    }

    fn login(redirect: &str) -> Option<Route> {
        Some(Route::Login {
            redirect: redirect.to_string(),
        })
    }

    #[test]
    fn test_guard_waits_while_session_restores() {
        let route = Route::ProjectEdit { id: 7 };
        assert_eq!(guard(&AuthState::default(), &route), None);
    }

    #[test]
    fn test_guard_sends_visitors_to_login_with_way_back() {
        let route = Route::ProjectEdit { id: 7 };
        assert_eq!(
            guard(&AuthState::signed_out(), &route),
            login("/dashboard/projects/7/edit")
        );
        assert_eq!(guard(&expired(), &route), login("/dashboard/projects/7/edit"));
    }

    #[test]
    fn test_guard_lets_signed_in_users_through() {
        let route = Route::Profile {};
        assert_eq!(guard(&AuthState::signed_in(user()), &route), None);
    }

    #[test]
    fn test_expired_session_on_public_page_goes_to_login() {
        let route = Route::ProjectDetail { id: 3 };
        assert_eq!(expired_redirect(&expired(), &route), login("/projects/3"));
    }

    #[test]
    fn test_expired_redirect_skips_auth_pages_and_live_sessions() {
        let state = expired();
        assert_eq!(expired_redirect(&state, &Route::Register {}), None);
        assert_eq!(
            expired_redirect(
                &state,
                &Route::Login {
                    redirect: "/profile".to_string()
                }
            ),
            None
        );
        let route = Route::Landing {};
        assert_eq!(expired_redirect(&AuthState::signed_out(), &route), None);
        assert_eq!(expired_redirect(&AuthState::signed_in(user()), &route), None);
    }
}
