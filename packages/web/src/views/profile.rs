use api::{keys, UpdateProfile};
use dioxus::prelude::*;
use store::format::format_date;
use store::validation::{validate_profile, FieldErrors, ProfileForm, MAX_BIO_LEN};
use store::{Resource, Technology, User};
use ui::components::{
    Autocomplete, Button, ButtonVariant, CatalogItem, CatalogKind, FormField, Input, Spinner,
    Textarea,
};
use ui::{use_api, use_auth, use_notifications};

fn form_from(user: &User) -> ProfileForm {
    ProfileForm {
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        bio: user.bio.clone().unwrap_or_default(),
        avatar_url: user.avatar_url.clone().unwrap_or_default(),
    }
}

fn profile_update(form: &ProfileForm, skills: &[Technology]) -> UpdateProfile {
    UpdateProfile {
        skill_ids: Some(skills.iter().map(|t| t.id).collect()),
        ..UpdateProfile::from(form)
    }
}

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();

    match auth().user {
        None => rsx! { Spinner {} },
        Some(user) => rsx! { ProfileEditor { key: "{user.id}", user } },
    }
}

#[component]
fn ProfileEditor(user: User) -> Element {
    let mut auth = use_auth();
    let mut api = use_api();
    let notifications = use_notifications();
    let mut form = use_signal(|| form_from(&user));
    let mut skills = use_signal(|| user.skills.clone());
    let mut errors = use_signal(FieldErrors::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let current = form();
            let problems = validate_profile(&current);
            if !problems.is_empty() {
                errors.set(problems);
                return;
            }
            errors.set(FieldErrors::new());

            saving.set(true);
            let update = profile_update(&current, &skills());
            match api.client().users().update_me(&update).await {
                Ok(updated) => {
                    tracing::info!(id = updated.id, "Profile updated");
                    api.queries().set(keys::me(), &updated);
                    api.invalidate(&[Resource::Users]);
                    auth.write().user = Some(updated);
                    notifications.success("Profile saved");
                }
                Err(e) => match e.field_errors() {
                    Some(fields) => errors.write().merge_server(fields),
                    None => notifications.report_error(&e),
                },
            }
            saving.set(false);
        });
    };

    let field_error = move |name: &str| errors().get(name).map(str::to_string);
    let state = form();
    let selected: Vec<CatalogItem> = skills().into_iter().map(CatalogItem::from).collect();
    let bio_len = state.bio.chars().count();
    let member_since = format_date(&user.created_at);
    let avatar = state.avatar_url.trim().to_string();

    rsx! {
        div {
            class: "flex flex-col gap-6 max-w-2xl",
            div {
                class: "flex items-center gap-4",
                if avatar.is_empty() {
                    div {
                        class: "flex items-center justify-center w-16 h-16 rounded-full bg-primary-100 text-primary-700 text-xl font-semibold",
                        "{user.initials()}"
                    }
                } else {
                    img { class: "w-16 h-16 rounded-full object-cover", src: "{avatar}", alt: "" }
                }
                div {
                    h1 { class: "m-0 text-2xl font-bold text-neutral-800", "{user.display_name()}" }
                    p { class: "m-0 text-sm text-neutral-500", "{user.email} · member since {member_since}" }
                }
            }

            form {
                class: "flex flex-col p-6 bg-white border border-neutral-200 rounded-lg",
                onsubmit: handle_save,
                novalidate: true,

                FormField {
                    label: "Username",
                    html_for: "profile-username",
                    error: field_error("username"),
                    Input {
                        id: "profile-username",
                        class: "w-full",
                        value: state.username.clone(),
                        oninput: move |evt: FormEvent| form.write().username = evt.value(),
                    }
                }
                div {
                    class: "grid grid-cols-2 gap-3",
                    FormField {
                        label: "First name",
                        html_for: "profile-first-name",
                        error: field_error("first_name"),
                        Input {
                            id: "profile-first-name",
                            class: "w-full",
                            value: state.first_name.clone(),
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                    }
                    FormField {
                        label: "Last name",
                        html_for: "profile-last-name",
                        error: field_error("last_name"),
                        Input {
                            id: "profile-last-name",
                            class: "w-full",
                            value: state.last_name.clone(),
                            oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                }
                FormField {
                    label: "Bio",
                    html_for: "profile-bio",
                    error: field_error("bio"),
                    hint: format!("{bio_len}/{MAX_BIO_LEN}"),
                    Textarea {
                        id: "profile-bio",
                        class: "w-full",
                        rows: "4",
                        value: state.bio.clone(),
                        oninput: move |evt: FormEvent| form.write().bio = evt.value(),
                    }
                }
                FormField {
                    label: "Avatar URL",
                    html_for: "profile-avatar",
                    error: field_error("avatar_url"),
                    Input {
                        id: "profile-avatar",
                        class: "w-full",
                        r#type: "url",
                        value: state.avatar_url.clone(),
                        oninput: move |evt: FormEvent| form.write().avatar_url = evt.value(),
                    }
                }
                FormField {
                    label: "Skills",
                    html_for: "profile-skills",
                    Autocomplete {
                        id: "profile-skills",
                        kind: CatalogKind::Technologies,
                        selected,
                        placeholder: "What do you work with?",
                        on_add: move |item: CatalogItem| {
                            let mut skills = skills.write();
                            if !skills.iter().any(|t| t.id == item.id) {
                                skills.push(Technology { id: item.id, name: item.name, category: None });
                            }
                        },
                        on_remove: move |id| skills.write().retain(|t| t.id != id),
                    }
                }

                div {
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save profile" }
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
    fn test_profile_update_carries_skills() {
        let form = ProfileForm {
            username: " ada ".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            bio: "  ".to_string(),
            avatar_url: String::new(),
        };
        let skills = vec![Technology {
            id: 5,
            name: "Rust".to_string(),
            category: None,
        }];
        let update = profile_update(&form, &skills);
        assert_eq!(update.username, "ada");
        assert_eq!(update.bio, None);
        assert_eq!(update.skill_ids, Some(vec![5]));
    }
}
