//! Owner-side editing of a project and its vacancies.

use api::{keys, UpdateProject};
use dioxus::prelude::*;
use store::validation::{validate_project_basics, validate_project_details, validate_vacancy_draft};
use store::wizard::VacancyDraft;
use store::{
    FieldErrors, NewQuestion, Project, ProjectDraft, ProjectStatus, Resource, Tag, Technology,
    Vacancy,
};
use ui::components::{
    Autocomplete, Button, ButtonVariant, CatalogItem, CatalogKind, EmptyState, ErrorBanner,
    FormField, Input, Spinner, Textarea,
};
use ui::icons::{FaLock, FaTrash};
use ui::{use_api, use_auth, use_notifications, use_query, Icon};

use crate::Route;

fn draft_from(project: &Project) -> ProjectDraft {
    ProjectDraft {
        title: project.title.clone(),
        short_description: project.short_description.clone(),
        description: project.description.clone(),
        status: project.status,
        repository_url: project.repository_url.clone().unwrap_or_default(),
        tags: project.tags.clone(),
        technologies: project.technologies.clone(),
        vacancies: Vec::new(),
    }
}

/// Full replacement of the editable fields. An empty repository URL clears it.
fn update_from(draft: &ProjectDraft) -> UpdateProject {
    let project = draft.to_new_project();
    UpdateProject {
        title: Some(project.title),
        short_description: Some(project.short_description),
        description: Some(project.description),
        status: Some(project.status),
        tag_ids: Some(project.tag_ids),
        technology_ids: Some(project.technology_ids),
        repository_url: Some(project.repository_url.unwrap_or_default()),
    }
}

fn validate_edit(draft: &ProjectDraft) -> FieldErrors {
    let mut errors = validate_project_basics(draft);
    for (field, message) in validate_project_details(draft).iter() {
        errors.add(field, message);
    }
    errors
}

#[component]
pub fn ProjectEdit(id: i64) -> Element {
    let auth = use_auth();

    let mut project_id = use_signal(|| id);
    if *project_id.peek() != id {
        project_id.set(id);
    }

    let mut project = use_query(
        move || keys::project(project_id()),
        move |client| {
            let id = project_id();
            async move { client.projects().get(id).await }
        },
    );

    let Some(result) = project.cloned() else {
        return rsx! { Spinner { label: "Loading project..." } };
    };
    let project_data = match result {
        Ok(p) => p,
        Err(e) => {
            return rsx! {
                ErrorBanner { message: e.to_string(), on_retry: move |_| project.restart() }
            }
        }
    };

    let is_owner = auth()
        .user
        .as_ref()
        .is_some_and(|u| project_data.is_owned_by(u.id));
    if !is_owner {
        return rsx! {
            EmptyState {
                title: "Not your project",
                message: "Only the owner can edit this project.",
                Link { class: "text-sm text-primary-600", to: Route::ProjectDetail { id }, "Back to project" }
            }
        };
    }

    rsx! {
        div {
            class: "flex flex-col gap-8 max-w-3xl",
            div {
                class: "flex items-baseline justify-between",
                h1 { class: "m-0 text-2xl font-bold text-neutral-800", "Edit project" }
                Link { class: "text-sm text-primary-600", to: Route::ProjectDetail { id: project_data.id }, "View project" }
            }
            ProjectForm { key: "{project_data.id}", project: project_data.clone() }
            VacancyManager { project_id: project_data.id }
        }
    }
}

#[component]
fn ProjectForm(project: Project) -> Element {
    let mut api = use_api();
    let notifications = use_notifications();
    let project_id = project.id;
    let mut draft = use_signal(|| draft_from(&project));
    let mut errors = use_signal(FieldErrors::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let current = draft();
            let problems = validate_edit(&current);
            if !problems.is_empty() {
                errors.set(problems);
                return;
            }
            errors.set(FieldErrors::new());

            saving.set(true);
            match api.client().projects().update(project_id, &update_from(&current)).await {
                Ok(updated) => {
                    tracing::info!(id = updated.id, "Project updated");
                    api.queries().set(keys::project(updated.id), &updated);
                    api.invalidate(&[Resource::Projects, Resource::Dashboard]);
                    notifications.success("Changes saved");
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
    let state = draft();
    let tags: Vec<CatalogItem> = state.tags.iter().cloned().map(CatalogItem::from).collect();
    let technologies: Vec<CatalogItem> = state
        .technologies
        .iter()
        .cloned()
        .map(CatalogItem::from)
        .collect();

    rsx! {
        form {
            class: "flex flex-col p-6 bg-white border border-neutral-200 rounded-lg",
            onsubmit: handle_save,
            novalidate: true,

            FormField {
                label: "Title",
                html_for: "edit-title",
                error: field_error("title"),
                Input {
                    id: "edit-title",
                    class: "w-full",
                    value: state.title.clone(),
                    oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                }
            }
            FormField {
                label: "Short description",
                html_for: "edit-short",
                error: field_error("short_description"),
                Input {
                    id: "edit-short",
                    class: "w-full",
                    value: state.short_description.clone(),
                    oninput: move |evt: FormEvent| draft.write().short_description = evt.value(),
                }
            }
            FormField {
                label: "Description",
                html_for: "edit-description",
                error: field_error("description"),
                hint: "Markdown is supported",
                Textarea {
                    id: "edit-description",
                    class: "w-full font-mono",
                    rows: "10",
                    value: state.description.clone(),
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
            }
            FormField {
                label: "Status",
                html_for: "edit-status",
                select {
                    id: "edit-status",
                    class: "w-full px-3 py-2 rounded border border-neutral-300 bg-white text-sm",
                    value: state.status.as_str(),
                    onchange: move |evt: FormEvent| {
                        if let Some(status) = ProjectStatus::parse(&evt.value()) {
                            draft.write().status = status;
                        }
                    },
                    for status in ProjectStatus::ALL {
                        option {
                            key: "{status.as_str()}",
                            value: status.as_str(),
                            selected: status == state.status,
                            "{status.label()}"
                        }
                    }
                }
            }
            FormField {
                label: "Technologies",
                html_for: "edit-technologies",
                error: field_error("technologies"),
                Autocomplete {
                    id: "edit-technologies",
                    kind: CatalogKind::Technologies,
                    selected: technologies,
                    on_add: move |item: CatalogItem| {
                        draft.write().add_technology(Technology { id: item.id, name: item.name, category: None });
                    },
                    on_remove: move |id| draft.write().remove_technology(id),
                }
            }
            FormField {
                label: "Tags",
                html_for: "edit-tags",
                Autocomplete {
                    id: "edit-tags",
                    kind: CatalogKind::Tags,
                    selected: tags,
                    on_add: move |item: CatalogItem| {
                        draft.write().add_tag(Tag { id: item.id, name: item.name });
                    },
                    on_remove: move |id| draft.write().remove_tag(id),
                }
            }
            FormField {
                label: "Repository URL",
                html_for: "edit-repository",
                error: field_error("repository_url"),
                Input {
                    id: "edit-repository",
                    class: "w-full",
                    r#type: "url",
                    value: state.repository_url.clone(),
                    oninput: move |evt: FormEvent| draft.write().repository_url = evt.value(),
                }
            }

            div {
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save changes" }
                }
            }
        }
    }
}

#[component]
fn VacancyManager(project_id: i64) -> Element {
    let mut api = use_api();
    let notifications = use_notifications();
    let mut new_vacancy = use_signal(VacancyDraft::default);
    let mut new_errors = use_signal(FieldErrors::new);
    let mut adding = use_signal(|| false);

    let mut pid = use_signal(|| project_id);
    if *pid.peek() != project_id {
        pid.set(project_id);
    }

    let mut vacancies = use_query(
        move || keys::vacancies(pid()),
        move |client| {
            let id = pid();
            async move { client.vacancies().list(id).await }
        },
    );

    let handle_add = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let draft = new_vacancy();
            let problems = validate_vacancy_draft(0, &draft);
            if !problems.is_empty() {
                new_errors.set(problems);
                return;
            }
            new_errors.set(FieldErrors::new());

            adding.set(true);
            match api.client().vacancies().create(&draft.to_new_vacancy(pid())).await {
                Ok(created) => {
                    tracing::info!(id = created.id, "Vacancy created");
                    api.invalidate(&[Resource::Vacancies, Resource::Project, Resource::Dashboard]);
                    new_vacancy.set(VacancyDraft::default());
                    notifications.success("Vacancy added");
                }
                Err(e) => notifications.report_error(&e),
            }
            adding.set(false);
        });
    };

    let new_state = new_vacancy();

    rsx! {
        section {
            class: "flex flex-col gap-4",
            h2 { class: "m-0 text-lg font-semibold text-neutral-800", "Vacancies" }

            match vacancies.cloned() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    ErrorBanner { message: e.to_string(), on_retry: move |_| vacancies.restart() }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "m-0 text-sm text-neutral-500", "No vacancies yet." }
                },
                Some(Ok(list)) => rsx! {
                    ul {
                        class: "flex flex-col gap-3 p-0 m-0 list-none",
                        for vacancy in list {
                            VacancyAdmin { key: "{vacancy.id}", vacancy }
                        }
                    }
                },
            }

            form {
                class: "flex flex-col p-4 bg-white border border-dashed border-neutral-300 rounded-lg",
                onsubmit: handle_add,
                novalidate: true,
                h3 { class: "m-0 mb-3 text-sm font-semibold text-neutral-800", "Add a vacancy" }
                FormField {
                    label: "Title",
                    html_for: "new-vacancy-title",
                    error: new_errors().get("vacancies.0.title").map(str::to_string),
                    Input {
                        id: "new-vacancy-title",
                        class: "w-full",
                        value: new_state.title.clone(),
                        oninput: move |evt: FormEvent| new_vacancy.write().title = evt.value(),
                    }
                }
                FormField {
                    label: "Description",
                    html_for: "new-vacancy-description",
                    error: new_errors().get("vacancies.0.description").map(str::to_string),
                    Textarea {
                        id: "new-vacancy-description",
                        class: "w-full",
                        rows: "4",
                        value: new_state.description.clone(),
                        oninput: move |evt: FormEvent| new_vacancy.write().description = evt.value(),
                    }
                }
                div {
                    Button {
                        variant: ButtonVariant::Secondary,
                        r#type: "submit",
                        disabled: adding(),
                        if adding() { "Adding..." } else { "Add vacancy" }
                    }
                }
            }
        }
    }
}

#[component]
fn VacancyAdmin(vacancy: Vacancy) -> Element {
    let mut api = use_api();
    let notifications = use_notifications();
    let mut busy = use_signal(|| false);
    let mut question_text = use_signal(String::new);
    let mut question_required = use_signal(|| false);
    let vacancy_id = vacancy.id;

    let handle_close = move |_| {
        spawn(async move {
            busy.set(true);
            match api.client().vacancies().close(vacancy_id).await {
                Ok(_) => {
                    tracing::info!(id = vacancy_id, "Vacancy closed");
                    api.invalidate(&[Resource::Vacancies, Resource::Vacancy, Resource::Project, Resource::Dashboard]);
                    notifications.info("Vacancy closed");
                }
                Err(e) => notifications.report_error(&e),
            }
            busy.set(false);
        });
    };

    let handle_delete = move |_| {
        spawn(async move {
            busy.set(true);
            match api.client().vacancies().delete(vacancy_id).await {
                Ok(()) => {
                    tracing::info!(id = vacancy_id, "Vacancy deleted");
                    api.invalidate(&[Resource::Vacancies, Resource::Vacancy, Resource::Project, Resource::Dashboard]);
                    notifications.success("Vacancy deleted");
                }
                Err(e) => {
                    busy.set(false);
                    notifications.report_error(&e);
                }
            }
        });
    };

    let handle_add_question = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let text = question_text().trim().to_string();
            if text.is_empty() {
                return;
            }
            let question = NewQuestion {
                vacancy_id: Some(vacancy_id),
                text,
                required: question_required(),
            };
            match api.client().questions().create(&question).await {
                Ok(_) => {
                    question_text.set(String::new());
                    question_required.set(false);
                    api.invalidate(&[Resource::Vacancy, Resource::Vacancies, Resource::Questions]);
                }
                Err(e) => notifications.report_error(&e),
            }
        });
    };

    let remove_question = move |question_id: i64| {
        spawn(async move {
            match api.client().questions().delete(question_id).await {
                Ok(()) => api.invalidate(&[Resource::Vacancy, Resource::Vacancies, Resource::Questions]),
                Err(e) => notifications.report_error(&e),
            }
        });
    };

    rsx! {
        li {
            class: "flex flex-col gap-3 p-4 bg-white border border-neutral-200 rounded-lg",
            div {
                class: "flex flex-wrap items-center justify-between gap-3",
                div {
                    class: "flex items-center gap-2",
                    Link {
                        class: "font-medium text-neutral-800",
                        to: Route::VacancyDetail { id: vacancy.id },
                        "{vacancy.title}"
                    }
                    if !vacancy.is_open {
                        span { class: "px-2 py-0.5 rounded bg-neutral-100 text-xs text-neutral-600", "Closed" }
                    }
                }
                div {
                    class: "flex items-center gap-2",
                    Link {
                        class: "text-sm text-primary-600",
                        to: Route::VacancyResponses { id: vacancy.id },
                        "Applications"
                    }
                    if vacancy.is_open {
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: busy(),
                            onclick: handle_close,
                            Icon { icon: FaLock, width: 10, height: 10 }
                            "Close"
                        }
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy(),
                        onclick: handle_delete,
                        Icon { icon: FaTrash, width: 10, height: 10 }
                        "Delete"
                    }
                }
            }

            ul {
                class: "flex flex-col gap-1 p-0 m-0 list-none",
                for question in vacancy.questions.iter() {
                    li {
                        key: "{question.id}",
                        class: "flex items-center justify-between gap-2 text-sm text-neutral-700",
                        span {
                            "{question.text}"
                            if question.required {
                                span { class: "ml-1 text-red-600", "*" }
                            }
                        }
                        button {
                            class: "p-1 bg-transparent border-none text-neutral-400 cursor-pointer hover:text-red-600",
                            title: "Remove question",
                            onclick: {
                                let question_id = question.id;
                                move |_| remove_question(question_id)
                            },
                            Icon { icon: FaTrash, width: 10, height: 10 }
                        }
                    }
                }
            }

            form {
                class: "flex items-center gap-2",
                onsubmit: handle_add_question,
                Input {
                    class: "flex-1",
                    placeholder: "New screening question",
                    value: question_text(),
                    oninput: move |evt: FormEvent| question_text.set(evt.value()),
                }
                label {
                    class: "flex items-center gap-1 text-xs text-neutral-600",
                    input {
                        r#type: "checkbox",
                        checked: question_required(),
                        onchange: move |evt: FormEvent| question_required.set(evt.checked()),
                    }
                    "Required"
                }
                Button { variant: ButtonVariant::Ghost, r#type: "submit", "Add" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use store::UserSummary;

    fn project() -> Project {
        Project {
            id: 3,
            title: "Orbit".to_string(),
            short_description: "Satellite tracker".to_string(),
            description: "# Orbit".to_string(),
            status: ProjectStatus::Active,
            owner: UserSummary {
                id: 1,
                username: "ada".to_string(),
                avatar_url: None,
            },
            tags: vec![Tag { id: 1, name: "space".to_string() }],
            technologies: vec![Technology { id: 2, name: "Rust".to_string(), category: None }],
            open_vacancies: 0,
            repository_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_update_clears_missing_repository() {
        let draft = draft_from(&project());
        let update = update_from(&draft);
        assert_eq!(update.title.as_deref(), Some("Orbit"));
        assert_eq!(update.tag_ids, Some(vec![1]));
        assert_eq!(update.technology_ids, Some(vec![2]));
        assert_eq!(update.repository_url.as_deref(), Some(""));
    }

    #[test]
    fn test_validate_edit_combines_steps() {
        let mut draft = draft_from(&project());
        draft.title.clear();
        draft.technologies.clear();
        let errors = validate_edit(&draft);
        assert!(errors.get("title").is_some());
        assert!(errors.get("technologies").is_some());
    }
}
