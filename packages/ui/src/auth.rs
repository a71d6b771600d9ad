//! Authentication context and hooks for the UI.

use std::time::Duration;

use api::{keys, ApiError, RegisterRequest};
use dioxus::prelude::*;
use store::validation::RegisterForm;
use store::User;

use crate::api_context::{use_api, Api};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    /// The server rejected the stored session; protected pages send the user to login.
    pub expired: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            expired: false,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
            expired: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
            expired: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn expire(&mut self) {
        self.user = None;
        self.loading = false;
        self.expired = true;
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
///
/// Restores the session from stored tokens on mount and, when
/// `session.check_interval_secs` is non-zero, re-validates it periodically.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let api = use_api();
    let mut auth_state = use_signal(AuthState::default);

    // Restore the session from stored tokens
    use_future(move || async move {
        let client = api.client();
        if !client.is_authenticated() {
            auth_state.set(AuthState::signed_out());
            return;
        }
        match client.users().me().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Session restored");
                api.queries().set(keys::me(), &user);
                auth_state.set(AuthState::signed_in(user));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not restore session");
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    // Periodic session check
    use_future(move || async move {
        let interval = api.config().session.check_interval_secs;
        if interval == 0 {
            return;
        }
        loop {
            api::runtime::sleep(Duration::from_secs(interval)).await;

            if auth_state.peek().user.is_none() {
                continue;
            }
            match api.client().users().me().await {
                Ok(user) => {
                    if auth_state.peek().user.as_ref() != Some(&user) {
                        auth_state.write().user = Some(user);
                    }
                }
                Err(e) if e.is_auth_error() => {
                    tracing::info!("Session expired");
                    auth_state.write().expire();
                }
                Err(e) => tracing::debug!(error = %e, "Session check failed"),
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

async fn finish_sign_in(
    mut auth: Signal<AuthState>,
    mut api: Api,
    user: Option<User>,
) -> Result<User, ApiError> {
    let user = match user {
        Some(user) => user,
        None => api.client().users().me().await?,
    };
    api.reset();
    api.queries().set(keys::me(), &user);
    auth.set(AuthState::signed_in(user.clone()));
    Ok(user)
}

/// Sign in with email and password and load the account.
pub async fn sign_in(
    auth: Signal<AuthState>,
    api: Api,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let response = api.client().auth().login(email, password).await?;
    finish_sign_in(auth, api, response.user).await
}

/// Create an account. Returns the user when the server signed them in right away,
/// `None` when they still have to log in.
pub async fn register(
    auth: Signal<AuthState>,
    api: Api,
    form: &RegisterForm,
) -> Result<Option<User>, ApiError> {
    let request = RegisterRequest::from(form);
    match api.client().auth().register(&request).await? {
        Some(response) => finish_sign_in(auth, api, response.user).await.map(Some),
        None => Ok(None),
    }
}

/// Revoke the session and forget everything cached for this user.
pub async fn sign_out(mut auth: Signal<AuthState>, mut api: Api) {
    api.client().auth().logout().await;
    api.reset();
    auth.set(AuthState::signed_out());
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_done: Option<EventHandler<()>>,
) -> Element {
    let auth_state = use_auth();
    let api = use_api();
    let mut busy = use_signal(|| false);

    let onclick = move |_| async move {
        busy.set(true);
        sign_out(auth_state, api).await;
        busy.set(false);
        if let Some(handler) = on_done {
            handler.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(!state.is_authenticated());
        assert!(!state.expired);
    }

    #[test]
    fn test_expire_drops_user() {
        let user = User {
            id: 1,
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            avatar_url: None,
            bio: None,
            skills: Vec::new(),
            created_at: chrono::Utc::now(),
        };
        let mut state = AuthState::signed_in(user);
        assert!(state.is_authenticated());

        state.expire();
        assert!(!state.is_authenticated());
        assert!(state.expired);
        assert!(!state.loading);
    }
}
