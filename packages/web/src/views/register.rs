//! Account creation.

use dioxus::prelude::*;
use store::validation::{validate_register, FieldErrors, RegisterForm, MIN_PASSWORD_LEN};
use ui::components::{Button, ButtonVariant, ErrorBanner, FormField, Input};
use ui::{register, use_api, use_auth, use_notifications};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let api = use_api();
    let notifications = use_notifications();
    let nav = use_navigator();
    let mut form = use_signal(RegisterForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if !auth().loading && auth().is_authenticated() {
        nav.replace(Route::Dashboard {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let current = form();
            let problems = validate_register(&current);
            if !problems.is_empty() {
                errors.set(problems);
                return;
            }
            errors.set(FieldErrors::new());

            loading.set(true);
            match register(auth, api, &current).await {
                Ok(Some(user)) => {
                    notifications.success(format!("Welcome to ProjectHub, {}", user.display_name()));
                    nav.replace(Route::Dashboard {});
                }
                Ok(None) => {
                    notifications.success("Account created. Please sign in.");
                    nav.replace(Route::Login {
                        redirect: Route::Dashboard {}.to_string(),
                    });
                }
                Err(e) => {
                    loading.set(false);
                    match e.field_errors() {
                        Some(fields) => errors.write().merge_server(fields),
                        None => error.set(Some(e.to_string())),
                    }
                }
            }
        });
    };

    let field_error = move |name: &str| errors().get(name).map(str::to_string);

    rsx! {
        div {
            class: "flex flex-col items-center py-12",

            h1 {
                class: "mb-2 text-neutral-800 font-bold text-[1.75rem]",
                "Create your account"
            }

            p {
                class: "mb-8 text-neutral-600 text-[0.9375rem]",
                "Publish projects, open vacancies and apply to teams."
            }

            form {
                onsubmit: handle_register,
                class: "flex flex-col w-full max-w-[400px]",
                novalidate: true,

                if let Some(err) = error() {
                    div { class: "mb-4", ErrorBanner { message: err } }
                }

                FormField {
                    label: "Email",
                    html_for: "register-email",
                    error: field_error("email"),
                    Input {
                        id: "register-email",
                        class: "w-full",
                        r#type: "email",
                        autocomplete: "email",
                        value: form().email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }

                FormField {
                    label: "Username",
                    html_for: "register-username",
                    error: field_error("username"),
                    Input {
                        id: "register-username",
                        class: "w-full",
                        r#type: "text",
                        autocomplete: "username",
                        value: form().username,
                        oninput: move |evt: FormEvent| form.write().username = evt.value(),
                    }
                }

                div {
                    class: "grid grid-cols-2 gap-3",
                    FormField {
                        label: "First name",
                        html_for: "register-first-name",
                        error: field_error("first_name"),
                        Input {
                            id: "register-first-name",
                            class: "w-full",
                            r#type: "text",
                            autocomplete: "given-name",
                            value: form().first_name,
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                    }
                    FormField {
                        label: "Last name",
                        html_for: "register-last-name",
                        error: field_error("last_name"),
                        Input {
                            id: "register-last-name",
                            class: "w-full",
                            r#type: "text",
                            autocomplete: "family-name",
                            value: form().last_name,
                            oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                }

                FormField {
                    label: "Password",
                    html_for: "register-password",
                    error: field_error("password"),
                    hint: format!("At least {MIN_PASSWORD_LEN} characters"),
                    Input {
                        id: "register-password",
                        class: "w-full",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form().password,
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }

                FormField {
                    label: "Confirm password",
                    html_for: "register-confirm",
                    error: field_error("confirm_password"),
                    Input {
                        id: "register-confirm",
                        class: "w-full",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form().confirm_password,
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full text-[0.9375rem] font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Create account" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "Already have an account? "
                Link {
                    class: "text-primary-500 no-underline",
                    to: Route::Login { redirect: String::new() },
                    "Sign in"
                }
            }
        }
    }
}
