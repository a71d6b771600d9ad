//! Four-step "new project" wizard.

use dioxus::prelude::*;
use store::{
    FieldErrors, ProjectStatus, ProjectWizard, Resource, Tag, Technology, WizardStep,
};
use ui::components::{
    Autocomplete, Button, ButtonVariant, CatalogItem, CatalogKind, FormField, Input, Markdown,
    StepIndicator, TagBadge, Textarea,
};
use ui::icons::{FaPlus, FaTrash};
use ui::{use_api, use_notifications, Icon};

use crate::Route;

fn tag_from(item: CatalogItem) -> Tag {
    Tag {
        id: item.id,
        name: item.name,
    }
}

fn technology_from(item: CatalogItem) -> Technology {
    Technology {
        id: item.id,
        name: item.name,
        category: None,
    }
}

/// Highest step index the user may jump to.
fn reachable_index(wizard: &ProjectWizard) -> usize {
    WizardStep::ALL
        .iter()
        .rev()
        .find(|step| wizard.can_visit(**step))
        .map(WizardStep::index)
        .unwrap_or(0)
}

fn field_error(errors: &FieldErrors, field: &str) -> Option<String> {
    errors.get(field).map(str::to_string)
}

#[component]
pub fn ProjectCreate() -> Element {
    let mut api = use_api();
    let notifications = use_notifications();
    let nav = use_navigator();
    let mut wizard = use_signal(ProjectWizard::default);
    let mut submitting = use_signal(|| false);

    let handle_next = move |_| {
        if let Err(errors) = wizard.write().next() {
            tracing::debug!(count = errors.len(), "Wizard step invalid");
        }
    };

    let handle_submit = move |_| {
        let project = match wizard.write().finish() {
            Ok(project) => project,
            Err(errors) => {
                notifications.error(
                    errors
                        .first()
                        .unwrap_or("Some steps still need attention")
                        .to_string(),
                );
                return;
            }
        };
        let vacancies = wizard.peek().draft.vacancies.clone();

        spawn(async move {
            submitting.set(true);
            let client = api.client();
            let created = match client.projects().create(&project).await {
                Ok(created) => created,
                Err(e) => {
                    submitting.set(false);
                    match e.field_errors() {
                        Some(fields) => {
                            let mut errors = FieldErrors::new();
                            errors.merge_server(fields);
                            wizard.write().set_errors(errors);
                        }
                        None => notifications.report_error(&e),
                    }
                    return;
                }
            };
            tracing::info!(id = created.id, "Project created");

            let mut failed = 0;
            for draft in vacancies.iter() {
                let vacancy = draft.to_new_vacancy(created.id);
                if let Err(e) = client.vacancies().create(&vacancy).await {
                    tracing::warn!(project_id = created.id, title = %vacancy.title, "Vacancy not created: {e}");
                    failed += 1;
                }
            }

            api.invalidate(&[Resource::Projects, Resource::Vacancies, Resource::Dashboard]);
            if failed == 0 {
                notifications.success("Project published");
            } else {
                notifications.error(format!(
                    "Project published, but {failed} vacancies could not be saved. Add them from the edit page."
                ));
            }
            nav.replace(Route::ProjectDetail { id: created.id });
        });
    };

    let state = wizard();
    let step = state.step();
    let titles: Vec<String> = WizardStep::ALL.iter().map(|s| s.title().to_string()).collect();

    rsx! {
        div {
            class: "max-w-3xl",
            h1 { class: "m-0 mb-6 text-2xl font-bold text-neutral-800", "New project" }

            StepIndicator {
                steps: titles,
                current: step.index(),
                reachable: reachable_index(&state),
                on_select: move |i: usize| {
                    if let Some(target) = WizardStep::ALL.get(i) {
                        wizard.write().go_to(*target);
                    }
                },
            }

            div {
                class: "h-1 mb-6 rounded bg-neutral-100 overflow-hidden",
                div {
                    class: "h-full bg-primary-500 transition-all",
                    style: "width: {state.progress() * 100.0}%",
                }
            }

            section {
                class: "p-6 bg-white border border-neutral-200 rounded-lg",
                match step {
                    WizardStep::Basics => rsx! { BasicsStep { wizard } },
                    WizardStep::Details => rsx! { DetailsStep { wizard } },
                    WizardStep::Vacancies => rsx! { VacanciesStep { wizard } },
                    WizardStep::Review => rsx! { ReviewStep { wizard } },
                }
            }

            div {
                class: "flex justify-between mt-6",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: step == WizardStep::Basics || submitting(),
                    onclick: move |_| {
                        wizard.write().back();
                    },
                    "Back"
                }
                if state.is_last() {
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: submitting(),
                        onclick: handle_submit,
                        if submitting() { "Publishing..." } else { "Publish project" }
                    }
                } else {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: handle_next,
                        "Continue"
                    }
                }
            }
        }
    }
}

#[component]
fn BasicsStep(wizard: Signal<ProjectWizard>) -> Element {
    let mut wizard = wizard;
    let state = wizard();
    let errors = state.errors();

    rsx! {
        FormField {
            label: "Title",
            html_for: "project-title",
            error: field_error(errors, "title"),
            Input {
                id: "project-title",
                class: "w-full",
                value: state.draft.title.clone(),
                oninput: move |evt: FormEvent| wizard.write().draft.title = evt.value(),
            }
        }
        FormField {
            label: "Short description",
            html_for: "project-short",
            error: field_error(errors, "short_description"),
            hint: "Shown on project cards",
            Input {
                id: "project-short",
                class: "w-full",
                value: state.draft.short_description.clone(),
                oninput: move |evt: FormEvent| wizard.write().draft.short_description = evt.value(),
            }
        }
        FormField {
            label: "Description",
            html_for: "project-description",
            error: field_error(errors, "description"),
            hint: "Markdown is supported",
            Textarea {
                id: "project-description",
                class: "w-full font-mono",
                rows: "10",
                value: state.draft.description.clone(),
                oninput: move |evt: FormEvent| wizard.write().draft.description = evt.value(),
            }
        }
    }
}

#[component]
fn DetailsStep(wizard: Signal<ProjectWizard>) -> Element {
    let mut wizard = wizard;
    let state = wizard();
    let errors = state.errors();
    let tags: Vec<CatalogItem> = state.draft.tags.iter().cloned().map(CatalogItem::from).collect();
    let technologies: Vec<CatalogItem> = state
        .draft
        .technologies
        .iter()
        .cloned()
        .map(CatalogItem::from)
        .collect();

    rsx! {
        FormField {
            label: "Status",
            html_for: "project-status",
            error: field_error(errors, "status"),
            select {
                id: "project-status",
                class: "w-full px-3 py-2 rounded border border-neutral-300 bg-white text-sm",
                value: state.draft.status.as_str(),
                onchange: move |evt: FormEvent| {
                    if let Some(status) = ProjectStatus::parse(&evt.value()) {
                        wizard.write().draft.status = status;
                    }
                },
                for status in ProjectStatus::ALL {
                    option {
                        key: "{status.as_str()}",
                        value: status.as_str(),
                        selected: status == state.draft.status,
                        "{status.label()}"
                    }
                }
            }
        }
        FormField {
            label: "Technologies",
            html_for: "project-technologies",
            error: field_error(errors, "technologies"),
            Autocomplete {
                id: "project-technologies",
                kind: CatalogKind::Technologies,
                selected: technologies,
                placeholder: "Rust, PostgreSQL, ...",
                on_add: move |item: CatalogItem| wizard.write().draft.add_technology(technology_from(item)),
                on_remove: move |id| wizard.write().draft.remove_technology(id),
            }
        }
        FormField {
            label: "Tags",
            html_for: "project-tags",
            error: field_error(errors, "tags"),
            Autocomplete {
                id: "project-tags",
                kind: CatalogKind::Tags,
                selected: tags,
                placeholder: "open source, fintech, ...",
                on_add: move |item: CatalogItem| wizard.write().draft.add_tag(tag_from(item)),
                on_remove: move |id| wizard.write().draft.remove_tag(id),
            }
        }
        FormField {
            label: "Repository URL",
            html_for: "project-repository",
            error: field_error(errors, "repository_url"),
            hint: "Optional",
            Input {
                id: "project-repository",
                class: "w-full",
                r#type: "url",
                placeholder: "https://github.com/...",
                value: state.draft.repository_url.clone(),
                oninput: move |evt: FormEvent| wizard.write().draft.repository_url = evt.value(),
            }
        }
    }
}

#[component]
fn VacanciesStep(wizard: Signal<ProjectWizard>) -> Element {
    let mut wizard = wizard;
    let count = wizard().draft.vacancies.len();

    rsx! {
        p {
            class: "m-0 mb-4 text-sm text-neutral-600",
            "Describe the roles you are looking for. You can also add them later."
        }
        for index in 0..count {
            VacancyEditor { key: "{index}", wizard, index }
        }
        Button {
            variant: ButtonVariant::Outline,
            onclick: move |_| {
                wizard.write().add_vacancy();
            },
            Icon { icon: FaPlus, width: 12, height: 12 }
            "Add vacancy"
        }
    }
}

#[component]
fn VacancyEditor(wizard: Signal<ProjectWizard>, index: usize) -> Element {
    let mut wizard = wizard;
    let state = wizard();
    let Some(vacancy) = state.draft.vacancies.get(index).cloned() else {
        return rsx! {};
    };
    let errors = state.errors();
    let field = move |name: &str| format!("vacancies.{index}.{name}");
    let technologies: Vec<CatalogItem> = vacancy
        .technologies
        .iter()
        .cloned()
        .map(CatalogItem::from)
        .collect();

    rsx! {
        fieldset {
            class: "flex flex-col mb-4 p-4 border border-neutral-200 rounded-lg",
            div {
                class: "flex items-center justify-between mb-3",
                legend { class: "text-sm font-semibold text-neutral-800", "Vacancy {index + 1}" }
                button {
                    class: "p-1 bg-transparent border-none text-neutral-500 cursor-pointer hover:text-red-600",
                    title: "Remove vacancy",
                    onclick: move |_| wizard.write().remove_vacancy(index),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
            FormField {
                label: "Title",
                html_for: "vacancy-{index}-title",
                error: field_error(errors, &field("title")),
                Input {
                    id: "vacancy-{index}-title",
                    class: "w-full",
                    value: vacancy.title.clone(),
                    oninput: move |evt: FormEvent| {
                        if let Some(v) = wizard.write().draft.vacancies.get_mut(index) {
                            v.title = evt.value();
                        }
                    },
                }
            }
            FormField {
                label: "Description",
                html_for: "vacancy-{index}-description",
                error: field_error(errors, &field("description")),
                Textarea {
                    id: "vacancy-{index}-description",
                    class: "w-full",
                    rows: "4",
                    value: vacancy.description.clone(),
                    oninput: move |evt: FormEvent| {
                        if let Some(v) = wizard.write().draft.vacancies.get_mut(index) {
                            v.description = evt.value();
                        }
                    },
                }
            }
            FormField {
                label: "Technologies",
                html_for: "vacancy-{index}-technologies",
                Autocomplete {
                    id: "vacancy-{index}-technologies",
                    kind: CatalogKind::Technologies,
                    selected: technologies,
                    on_add: move |item: CatalogItem| {
                        if let Some(v) = wizard.write().draft.vacancies.get_mut(index) {
                            if !v.technologies.iter().any(|t| t.id == item.id) {
                                v.technologies.push(technology_from(item));
                            }
                        }
                    },
                    on_remove: move |id| {
                        if let Some(v) = wizard.write().draft.vacancies.get_mut(index) {
                            v.technologies.retain(|t| t.id != id);
                        }
                    },
                }
            }

            h3 { class: "m-0 mb-2 text-sm font-medium text-neutral-700", "Screening questions" }
            for (q, question) in vacancy.questions.iter().enumerate() {
                div {
                    key: "{q}",
                    class: "flex flex-col gap-1 mb-2",
                    div {
                        class: "flex items-center gap-2",
                        Input {
                            class: "flex-1",
                            placeholder: "Question",
                            value: question.text.clone(),
                            oninput: move |evt: FormEvent| {
                                if let Some(v) = wizard.write().draft.vacancies.get_mut(index) {
                                    if let Some(question) = v.questions.get_mut(q) {
                                        question.text = evt.value();
                                    }
                                }
                            },
                        }
                        label {
                            class: "flex items-center gap-1 text-xs text-neutral-600",
                            input {
                                r#type: "checkbox",
                                checked: question.required,
                                onchange: move |evt: FormEvent| {
                                    if let Some(v) = wizard.write().draft.vacancies.get_mut(index) {
                                        if let Some(question) = v.questions.get_mut(q) {
                                            question.required = evt.checked();
                                        }
                                    }
                                },
                            }
                            "Required"
                        }
                        button {
                            class: "p-1 bg-transparent border-none text-neutral-400 cursor-pointer hover:text-red-600",
                            title: "Remove question",
                            onclick: move |_| wizard.write().remove_question(index, q),
                            Icon { icon: FaTrash, width: 10, height: 10 }
                        }
                    }
                    if let Some(message) = errors.get(&field(&format!("questions.{q}"))) {
                        span { class: "text-xs text-red-600", "{message}" }
                    }
                }
            }
            button {
                class: "self-start bg-transparent border-none p-0 text-sm text-primary-600 cursor-pointer",
                onclick: move |_| wizard.write().add_question(index),
                "+ Add question"
            }
        }
    }
}

#[component]
fn ReviewStep(wizard: Signal<ProjectWizard>) -> Element {
    let draft = wizard().draft;
    let repository = draft.repository_url.trim().to_string();

    rsx! {
        div {
            class: "flex flex-col gap-4",
            div {
                h2 { class: "m-0 text-xl font-semibold text-neutral-800", "{draft.title}" }
                p { class: "m-0 mt-1 text-neutral-600", "{draft.short_description}" }
                p { class: "m-0 mt-1 text-xs text-neutral-500", "Status: {draft.status.label()}" }
            }
            div {
                class: "flex flex-wrap gap-1.5",
                for tech in draft.technologies.iter() {
                    TagBadge { key: "tech-{tech.id}", label: tech.name.clone(), active: true }
                }
                for tag in draft.tags.iter() {
                    TagBadge { key: "tag-{tag.id}", label: tag.name.clone() }
                }
            }
            if !repository.is_empty() {
                p { class: "m-0 text-sm text-primary-600 break-all", "{repository}" }
            }
            div {
                class: "p-4 rounded border border-neutral-200",
                Markdown { source: draft.description.clone() }
            }
            h3 { class: "m-0 text-sm font-semibold text-neutral-800", "Vacancies" }
            if draft.vacancies.is_empty() {
                p { class: "m-0 text-sm text-neutral-500", "None yet." }
            }
            ul {
                class: "flex flex-col gap-2 p-0 m-0 list-none",
                for (i, vacancy) in draft.vacancies.iter().enumerate() {
                    li {
                        key: "{i}",
                        class: "p-3 rounded bg-neutral-50 text-sm",
                        span { class: "font-medium text-neutral-800", "{vacancy.title}" }
                        if !vacancy.questions.is_empty() {
                            span {
                                class: "ml-2 text-xs text-neutral-500",
                                "{store::format::pluralize(vacancy.questions.len() as i64, \"question\", \"questions\")}"
                            }
                        }
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
    fn test_reachable_index_follows_progress() {
        let mut wizard = ProjectWizard::default();
        assert_eq!(reachable_index(&wizard), 0);

        wizard.draft.title = "Compiler".to_string();
        wizard.draft.short_description = "A toy compiler".to_string();
        wizard.draft.description = "Long text".to_string();
        assert!(wizard.next().is_ok());
        assert_eq!(reachable_index(&wizard), 1);

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::Basics);
        assert_eq!(reachable_index(&wizard), 1);
    }

    #[test]
    fn test_catalog_items_become_models() {
        let item = CatalogItem {
            id: 4,
            name: "Rust".to_string(),
        };
        let technology = technology_from(item.clone());
        assert_eq!(technology.id, 4);
        assert_eq!(technology.category, None);
        assert_eq!(tag_from(item).name, "Rust");
    }
}
