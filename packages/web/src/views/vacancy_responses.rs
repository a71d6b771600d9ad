//! Applications received for one vacancy, with accept/reject.

use api::keys;
use chrono::Utc;
use dioxus::prelude::*;
use store::format::{format_date, pluralize};
use store::{Question, Resource, ResponseStatus, VacancyResponse};
use ui::components::{Button, ButtonVariant, EmptyState, ErrorBanner, Spinner};
use ui::icons::{FaCheck, FaXmark};
use ui::{use_api, use_notifications, use_query, Icon};

use super::dashboard::ResponseStatusBadge;
use crate::Route;

/// Pending first, then newest first.
fn review_order(responses: &mut [VacancyResponse]) {
    responses.sort_by(|a, b| {
        let pending = |r: &VacancyResponse| r.status != ResponseStatus::Pending;
        pending(a)
            .cmp(&pending(b))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

fn matches_status(response: &VacancyResponse, status: Option<ResponseStatus>) -> bool {
    status.is_none_or(|s| response.status == s)
}

#[component]
pub fn VacancyResponses(id: i64) -> Element {
    let mut status_filter = use_signal(|| Option::<ResponseStatus>::None);

    let mut vacancy_id = use_signal(|| id);
    if *vacancy_id.peek() != id {
        vacancy_id.set(id);
    }

    let vacancy = use_query(
        move || keys::vacancy(vacancy_id()),
        move |client| {
            let id = vacancy_id();
            async move { client.vacancies().get(id).await }
        },
    );
    let mut responses = use_query(
        move || keys::responses(vacancy_id()),
        move |client| {
            let id = vacancy_id();
            async move { client.vacancies().responses(id).await }
        },
    );

    let vacancy_data = vacancy.cloned().and_then(Result::ok);
    let title = vacancy_data
        .as_ref()
        .map(|v| v.title.clone())
        .unwrap_or_else(|| format!("Vacancy #{id}"));
    let questions = vacancy_data.map(|v| v.questions).unwrap_or_default();

    let filters = [
        (None, "All"),
        (Some(ResponseStatus::Pending), "Pending"),
        (Some(ResponseStatus::Accepted), "Accepted"),
        (Some(ResponseStatus::Rejected), "Rejected"),
    ];

    rsx! {
        div {
            class: "flex flex-col gap-6 max-w-3xl",
            div {
                Link { class: "text-sm text-primary-600", to: Route::VacancyDetail { id }, "← {title}" }
                h1 { class: "m-0 mt-2 text-2xl font-bold text-neutral-800", "Applications" }
            }

            div {
                class: "flex gap-2",
                for (status, label) in filters {
                    button {
                        key: "{label}",
                        class: if status_filter() == status {
                            "px-3 py-1 rounded-full border-none text-sm bg-primary-500 text-white cursor-pointer"
                        } else {
                            "px-3 py-1 rounded-full border-none text-sm bg-neutral-100 text-neutral-600 cursor-pointer hover:bg-neutral-200"
                        },
                        onclick: move |_| status_filter.set(status),
                        "{label}"
                    }
                }
            }

            match responses.cloned() {
                None => rsx! { Spinner { label: "Loading applications..." } },
                Some(Err(e)) => rsx! {
                    ErrorBanner { message: e.to_string(), on_retry: move |_| responses.restart() }
                },
                Some(Ok(mut list)) => {
                    review_order(&mut list);
                    let total = list.len();
                    let shown: Vec<VacancyResponse> = list
                        .into_iter()
                        .filter(|r| matches_status(r, status_filter()))
                        .collect();
                    if shown.is_empty() {
                        rsx! {
                            EmptyState {
                                title: if total == 0 { "No applications yet".to_string() } else { "Nothing in this view".to_string() },
                            }
                        }
                    } else {
                        rsx! {
                            p { class: "m-0 text-sm text-neutral-500", {pluralize(shown.len() as i64, "application", "applications")} }
                            ul {
                                class: "flex flex-col gap-4 p-0 m-0 list-none",
                                for response in shown {
                                    ResponseCard { key: "{response.id}", response, questions: questions.clone() }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ResponseCard(response: VacancyResponse, questions: Vec<Question>) -> Element {
    let mut api = use_api();
    let notifications = use_notifications();
    let mut busy = use_signal(|| false);
    let response_id = response.id;

    let decide = move |status: ResponseStatus| {
        spawn(async move {
            busy.set(true);
            match api
                .client()
                .vacancies()
                .set_response_status(response_id, status)
                .await
            {
                Ok(updated) => {
                    tracing::info!(id = updated.id, status = updated.status.as_str(), "Application reviewed");
                    api.invalidate(&[Resource::Responses, Resource::Dashboard]);
                    notifications.success(format!("Application {}", updated.status.label().to_lowercase()));
                }
                Err(e) => notifications.report_error(&e),
            }
            busy.set(false);
        });
    };

    let received = format_date(&response.created_at);
    let is_new = (Utc::now() - response.created_at).num_hours() < 24;

    rsx! {
        li {
            class: "flex flex-col gap-3 p-5 bg-white border border-neutral-200 rounded-lg",
            div {
                class: "flex items-center justify-between gap-3",
                div {
                    class: "flex items-center gap-2",
                    span { class: "font-medium text-neutral-800", "{response.applicant.username}" }
                    if is_new {
                        span { class: "px-1.5 py-0.5 rounded bg-primary-50 text-[10px] font-semibold text-primary-700 uppercase", "New" }
                    }
                    span { class: "text-xs text-neutral-500", "{received}" }
                }
                ResponseStatusBadge { status: response.status }
            }

            p { class: "m-0 text-sm text-neutral-700 whitespace-pre-wrap", "{response.cover_letter}" }

            if !response.answers.is_empty() {
                dl {
                    class: "flex flex-col gap-2 m-0",
                    for answer in response.answers.iter() {
                        div {
                            key: "{answer.question_id}",
                            dt {
                                class: "text-xs font-medium text-neutral-500",
                                {questions
                                    .iter()
                                    .find(|q| q.id == answer.question_id)
                                    .map(|q| q.text.clone())
                                    .unwrap_or_else(|| format!("Question #{}", answer.question_id))}
                            }
                            dd { class: "m-0 text-sm text-neutral-700", "{answer.text}" }
                        }
                    }
                }
            }

            if response.status == ResponseStatus::Pending {
                div {
                    class: "flex gap-2",
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: busy(),
                        onclick: move |_| decide(ResponseStatus::Accepted),
                        Icon { icon: FaCheck, width: 12, height: 12 }
                        "Accept"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy(),
                        onclick: move |_| decide(ResponseStatus::Rejected),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                        "Reject"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use store::UserSummary;

    fn response(id: i64, status: ResponseStatus, age_hours: i64) -> VacancyResponse {
        VacancyResponse {
            id,
            vacancy_id: 1,
            applicant: UserSummary {
                id: 10 + id,
                username: format!("user{id}"),
                avatar_url: None,
            },
            cover_letter: "Hi".to_string(),
            answers: Vec::new(),
            status,
            created_at: Utc::now() - Duration::hours(age_hours),
        }
    }

    #[test]
    fn test_review_order_puts_pending_first() {
        let mut list = vec![
            response(1, ResponseStatus::Accepted, 1),
            response(2, ResponseStatus::Pending, 10),
            response(3, ResponseStatus::Pending, 2),
            response(4, ResponseStatus::Rejected, 0),
        ];
        review_order(&mut list);
        let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_matches_status() {
        let r = response(1, ResponseStatus::Rejected, 0);
        assert!(matches_status(&r, None));
        assert!(matches_status(&r, Some(ResponseStatus::Rejected)));
        assert!(!matches_status(&r, Some(ResponseStatus::Pending)));
    }
}
