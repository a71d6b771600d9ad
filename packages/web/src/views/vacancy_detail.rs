//! Vacancy page with the application form.

use std::collections::BTreeMap;

use api::{keys, NewResponse};
use dioxus::prelude::*;
use store::validation::{validate_response, FieldErrors, MAX_COVER_LETTER_LEN};
use store::{Answer, Question, Resource, Vacancy};
use ui::components::{
    Button, ButtonVariant, ErrorBanner, FormField, Markdown, Spinner, TagBadge, Textarea,
};
use ui::{use_api, use_auth, use_notifications, use_query};

use crate::Route;

#[component]
pub fn VacancyDetail(id: i64) -> Element {
    let auth = use_auth();

    let mut vacancy_id = use_signal(|| id);
    if *vacancy_id.peek() != id {
        vacancy_id.set(id);
    }

    let mut vacancy = use_query(
        move || keys::vacancy(vacancy_id()),
        move |client| {
            let id = vacancy_id();
            async move { client.vacancies().get(id).await }
        },
    );

    let Some(result) = vacancy.cloned() else {
        return rsx! { Spinner { label: "Loading vacancy..." } };
    };
    let vacancy_data = match result {
        Ok(v) => v,
        Err(e) => {
            return rsx! {
                ErrorBanner { message: e.to_string(), on_retry: move |_| vacancy.restart() }
            }
        }
    };

    let state = auth();

    rsx! {
        article {
            class: "flex flex-col gap-6 max-w-3xl",
            Link {
                class: "text-sm text-primary-600",
                to: Route::ProjectDetail { id: vacancy_data.project_id },
                "← Back to project"
            }
            header {
                class: "flex flex-col gap-2",
                div {
                    class: "flex items-center gap-3",
                    h1 { class: "m-0 text-2xl font-bold text-neutral-800", "{vacancy_data.title}" }
                    if !vacancy_data.is_open {
                        span { class: "px-2 py-0.5 rounded bg-neutral-100 text-xs text-neutral-600", "Closed" }
                    }
                }
                div {
                    class: "flex flex-wrap gap-1.5",
                    for tech in vacancy_data.technologies.iter() {
                        TagBadge { key: "{tech.id}", label: tech.name.clone(), active: true }
                    }
                }
            }

            section {
                class: "p-5 bg-white border border-neutral-200 rounded-lg",
                Markdown { source: vacancy_data.description.clone() }
            }

            if !vacancy_data.is_open {
                p { class: "m-0 text-sm text-neutral-500", "This vacancy no longer accepts applications." }
            } else if state.loading {
                Spinner {}
            } else if state.is_authenticated() {
                ResponseForm { vacancy: vacancy_data.clone() }
            } else {
                div {
                    class: "p-5 bg-neutral-50 border border-neutral-200 rounded-lg text-sm text-neutral-600",
                    "Want this role? "
                    Link {
                        class: "text-primary-600",
                        to: Route::Login { redirect: Route::VacancyDetail { id: vacancy_data.id }.to_string() },
                        "Sign in to apply"
                    }
                }
            }
        }
    }
}

fn build_response(cover_letter: &str, questions: &[Question], answers: &BTreeMap<i64, String>) -> NewResponse {
    NewResponse {
        cover_letter: cover_letter.trim().to_string(),
        answers: questions
            .iter()
            .filter_map(|q| {
                let text = answers.get(&q.id)?.trim();
                (!text.is_empty()).then(|| Answer {
                    question_id: q.id,
                    text: text.to_string(),
                })
            })
            .collect(),
    }
}

#[component]
fn ResponseForm(vacancy: Vacancy) -> Element {
    let mut api = use_api();
    let notifications = use_notifications();
    let mut cover_letter = use_signal(String::new);
    let mut answers = use_signal(BTreeMap::<i64, String>::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut submitting = use_signal(|| false);
    let mut sent = use_signal(|| false);

    let vacancy_id = vacancy.id;
    let questions = vacancy.questions.clone();
    let form_questions = questions.clone();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let questions = form_questions.clone();
        spawn(async move {
            let letter = cover_letter();
            let given = answers();
            let problems = validate_response(&questions, &given, &letter);
            if !problems.is_empty() {
                errors.set(problems);
                return;
            }
            errors.set(FieldErrors::new());

            submitting.set(true);
            let response = build_response(&letter, &questions, &given);
            match api.client().vacancies().respond(vacancy_id, &response).await {
                Ok(_) => {
                    tracing::info!(vacancy_id, "Application sent");
                    api.invalidate(&[Resource::Responses, Resource::Dashboard]);
                    notifications.success("Application sent");
                    sent.set(true);
                }
                Err(e) => {
                    match e.field_errors() {
                        Some(fields) => errors.write().merge_server(fields),
                        None => notifications.report_error(&e),
                    }
                }
            }
            submitting.set(false);
        });
    };

    if sent() {
        return rsx! {
            div {
                class: "p-5 bg-green-50 border border-green-200 rounded-lg text-sm text-green-700",
                "Your application is on its way. You can follow its status on the "
                Link { class: "text-green-800 underline", to: Route::Dashboard {}, "dashboard" }
                "."
            }
        };
    }

    let letter_len = cover_letter().chars().count();

    rsx! {
        form {
            class: "flex flex-col p-5 bg-white border border-neutral-200 rounded-lg",
            onsubmit: handle_submit,
            novalidate: true,
            h2 { class: "m-0 mb-4 text-lg font-semibold text-neutral-800", "Apply" }

            FormField {
                label: "Cover letter",
                html_for: "response-cover-letter",
                error: errors().get("cover_letter").map(str::to_string),
                hint: format!("{letter_len}/{MAX_COVER_LETTER_LEN}"),
                Textarea {
                    id: "response-cover-letter",
                    class: "w-full",
                    rows: "6",
                    value: cover_letter(),
                    oninput: move |evt: FormEvent| cover_letter.set(evt.value()),
                }
            }

            for question in questions.iter() {
                FormField {
                    key: "{question.id}",
                    label: if question.required { format!("{} *", question.text) } else { question.text.clone() },
                    html_for: "answer-{question.id}",
                    error: errors().get(&format!("answers.{}", question.id)).map(str::to_string),
                    Textarea {
                        id: "answer-{question.id}",
                        class: "w-full",
                        rows: "3",
                        value: answers().get(&question.id).cloned().unwrap_or_default(),
                        oninput: {
                            let question_id = question.id;
                            move |evt: FormEvent| {
                                answers.write().insert(question_id, evt.value());
                            }
                        },
                    }
                }
            }

            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Sending..." } else { "Send application" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, required: bool) -> Question {
        Question {
            id,
            vacancy_id: 1,
            text: format!("Question {id}"),
            required,
        }
    }

    #[test]
    fn test_build_response_skips_blank_answers() {
        let questions = vec![question(1, true), question(2, false), question(3, false)];
        let answers = BTreeMap::from([
            (1, " Five years ".to_string()),
            (2, "   ".to_string()),
            (9, "stray".to_string()),
        ]);
        let response = build_response("  Hello  ", &questions, &answers);
        assert_eq!(response.cover_letter, "Hello");
        assert_eq!(
            response.answers,
            vec![Answer {
                question_id: 1,
                text: "Five years".to_string()
            }]
        );
    }
}
