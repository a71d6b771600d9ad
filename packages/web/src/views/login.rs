//! Login page view with email/password.

use dioxus::prelude::*;
use store::validation::{validate_login, FieldErrors, LoginForm};
use ui::components::{Button, ButtonVariant, ErrorBanner, FormField, Input};
use ui::{sign_in, use_api, use_auth, use_notifications};

use crate::Route;

/// Accept only paths inside this app as a post-login destination.
fn safe_redirect(target: &str) -> Option<&str> {
    let target = target.trim();
    let internal = target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.contains("://");
    let loops = target == "/login" || target.starts_with("/login?") || target == "/register";
    (internal && !loops).then_some(target)
}

/// Where to go after signing in.
fn resolve_redirect(target: &str) -> Route {
    safe_redirect(target)
        .and_then(|path| path.parse::<Route>().ok())
        .unwrap_or(Route::Dashboard {})
}

#[component]
pub fn Login(redirect: String) -> Element {
    let auth = use_auth();
    let api = use_api();
    let notifications = use_notifications();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go straight to the destination
    if !auth().loading && auth().is_authenticated() {
        nav.replace(resolve_redirect(&redirect));
    }

    let target = redirect.clone();
    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let target = target.clone();
        spawn(async move {
            error.set(None);

            let form = LoginForm {
                email: email(),
                password: password(),
            };
            let problems = validate_login(&form);
            if !problems.is_empty() {
                errors.set(problems);
                return;
            }
            errors.set(FieldErrors::new());

            loading.set(true);
            match sign_in(auth, api, &form.email, &form.password).await {
                Ok(user) => {
                    notifications.success(format!("Welcome back, {}", user.display_name()));
                    nav.replace(resolve_redirect(&target));
                }
                Err(e) => {
                    loading.set(false);
                    if let Some(fields) = e.field_errors() {
                        errors.write().merge_server(fields);
                    }
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let expired = auth().expired;

    rsx! {
        div {
            class: "flex flex-col items-center py-12",

            h1 {
                class: "mb-2 text-neutral-800 font-bold text-[1.75rem]",
                "Sign in"
            }

            p {
                class: "mb-8 text-neutral-600 text-[0.9375rem]",
                if expired { "Your session has expired. Please sign in again." } else { "Welcome back to ProjectHub" }
            }

            form {
                onsubmit: handle_login,
                class: "flex flex-col w-full max-w-[360px]",
                novalidate: true,

                if let Some(err) = error() {
                    div { class: "mb-4", ErrorBanner { message: err } }
                }

                FormField {
                    label: "Email",
                    html_for: "login-email",
                    error: errors().get("email").map(str::to_string),
                    Input {
                        id: "login-email",
                        class: "w-full",
                        r#type: "email",
                        autocomplete: "email",
                        placeholder: "you@example.com",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }

                FormField {
                    label: "Password",
                    html_for: "login-password",
                    error: errors().get("password").map(str::to_string),
                    Input {
                        id: "login-password",
                        class: "w-full",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full text-[0.9375rem] font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "Don't have an account? "
                Link {
                    class: "text-primary-500 no-underline",
                    to: Route::Register {},
                    "Sign up"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_paths_accepted() {
        assert_eq!(safe_redirect("/dashboard"), Some("/dashboard"));
        assert_eq!(
            safe_redirect(" /dashboard/projects/3/edit "),
            Some("/dashboard/projects/3/edit")
        );
    }

    #[test]
    fn test_external_and_looping_targets_rejected() {
        assert_eq!(safe_redirect(""), None);
        assert_eq!(safe_redirect("https://evil.example"), None);
        assert_eq!(safe_redirect("//evil.example/path"), None);
        assert_eq!(safe_redirect("/\\evil.example"), None);
        assert_eq!(safe_redirect("dashboard"), None);
        assert_eq!(safe_redirect("/login"), None);
        assert_eq!(safe_redirect("/login?redirect=/profile"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_dashboard() {
        assert_eq!(resolve_redirect("https://evil.example"), Route::Dashboard {});
        assert_eq!(resolve_redirect("/profile"), Route::Profile {});
        assert_eq!(resolve_redirect("/projects/12"), Route::ProjectDetail { id: 12 });
    }
}
