//! # Form validation
//!
//! Client-side checks run before a form is posted. They mirror the API's own rules
//! closely enough to catch typos early; the server stays authoritative and its
//! field errors are merged back with [`FieldErrors::merge_server`].
//!
//! Every validator returns a [`FieldErrors`] keyed by form field name, holding the
//! first problem found per field.

use std::collections::BTreeMap;

use crate::models::Question;
use crate::wizard::{ProjectDraft, VacancyDraft};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 32;
pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_SHORT_DESCRIPTION_LEN: usize = 280;
pub const MAX_BIO_LEN: usize = 500;
pub const MAX_COVER_LETTER_LEN: usize = 2000;

/// Per-field validation messages, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field.to_string(), message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// First message overall, for a summary banner.
    pub fn first(&self) -> Option<&str> {
        self.errors.first().map(|(_, m)| m.as_str())
    }

    /// Merge field errors returned by the API (`{"field": ["message", ...]}`).
    pub fn merge_server(&mut self, fields: &BTreeMap<String, Vec<String>>) {
        for (field, messages) in fields {
            if let Some(message) = messages.first() {
                self.add(field, message.clone());
            }
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn is_valid_url(url: &str) -> bool {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/') && !host.contains(' '))
}

fn check_required(errors: &mut FieldErrors, field: &str, value: &str, label: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
        false
    } else {
        true
    }
}

fn check_max_len(errors: &mut FieldErrors, field: &str, value: &str, label: &str, max: usize) {
    if value.trim().chars().count() > max {
        errors.add(field, format!("{label} must be at most {max} characters"));
    }
}

fn check_password(errors: &mut FieldErrors, field: &str, password: &str) {
    if password.is_empty() {
        errors.add(field, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            field,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    } else if !password.chars().any(char::is_alphabetic) || !password.chars().any(|c| c.is_ascii_digit()) {
        errors.add(field, "Password must contain a letter and a digit");
    }
}

fn check_username(errors: &mut FieldErrors, username: &str) {
    let username = username.trim();
    if !check_required(errors, "username", username, "Username") {
        return;
    }
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        errors.add(
            "username",
            format!("Username must be {MIN_USERNAME_LEN} to {MAX_USERNAME_LEN} characters"),
        );
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        errors.add(
            "username",
            "Username may only contain letters, digits, '_' and '-'",
        );
    }
}

/// Sign-in form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if check_required(&mut errors, "email", &form.email, "Email") && !is_valid_email(&form.email) {
        errors.add("email", "Please enter a valid email");
    }
    if form.password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors
}

/// Sign-up form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn validate_register(form: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if check_required(&mut errors, "email", &form.email, "Email") && !is_valid_email(&form.email) {
        errors.add("email", "Please enter a valid email");
    }
    check_username(&mut errors, &form.username);
    check_password(&mut errors, "password", &form.password);
    if form.password != form.confirm_password {
        errors.add("confirm_password", "Passwords do not match");
    }
    errors
}

/// Profile edit form for `users/me`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub avatar_url: String,
}

pub fn validate_profile(form: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_username(&mut errors, &form.username);
    check_max_len(&mut errors, "first_name", &form.first_name, "First name", 64);
    check_max_len(&mut errors, "last_name", &form.last_name, "Last name", 64);
    check_max_len(&mut errors, "bio", &form.bio, "Bio", MAX_BIO_LEN);
    if !form.avatar_url.trim().is_empty() && !is_valid_url(&form.avatar_url) {
        errors.add("avatar_url", "Avatar must be an http(s) URL");
    }
    errors
}

/// First wizard step: title and descriptions.
pub fn validate_project_basics(draft: &ProjectDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if check_required(&mut errors, "title", &draft.title, "Title") {
        check_max_len(&mut errors, "title", &draft.title, "Title", MAX_TITLE_LEN);
    }
    if check_required(
        &mut errors,
        "short_description",
        &draft.short_description,
        "Short description",
    ) {
        check_max_len(
            &mut errors,
            "short_description",
            &draft.short_description,
            "Short description",
            MAX_SHORT_DESCRIPTION_LEN,
        );
    }
    check_required(&mut errors, "description", &draft.description, "Description");
    errors
}

/// Second wizard step: catalog selections and links.
pub fn validate_project_details(draft: &ProjectDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.technologies.is_empty() {
        errors.add("technologies", "Pick at least one technology");
    }
    if !draft.repository_url.trim().is_empty() && !is_valid_url(&draft.repository_url) {
        errors.add("repository_url", "Repository must be an http(s) URL");
    }
    errors
}

/// A vacancy in the third wizard step; fields are prefixed with `vacancies.<index>.`.
pub fn validate_vacancy_draft(index: usize, vacancy: &VacancyDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let field = |name: &str| format!("vacancies.{index}.{name}");
    if vacancy.title.trim().is_empty() {
        errors.add(&field("title"), "Vacancy title is required");
    } else {
        check_max_len(&mut errors, &field("title"), &vacancy.title, "Vacancy title", MAX_TITLE_LEN);
    }
    if vacancy.description.trim().is_empty() {
        errors.add(&field("description"), "Vacancy description is required");
    }
    for (q, question) in vacancy.questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            errors.add(&field(&format!("questions.{q}")), "Question text cannot be empty");
        }
    }
    errors
}

/// Application form: cover letter plus answers to the vacancy's questions.
pub fn validate_response(
    questions: &[Question],
    answers: &BTreeMap<i64, String>,
    cover_letter: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "cover_letter", cover_letter, "Cover letter");
    check_max_len(
        &mut errors,
        "cover_letter",
        cover_letter,
        "Cover letter",
        MAX_COVER_LETTER_LEN,
    );
    for question in questions.iter().filter(|q| q.required) {
        let answered = answers
            .get(&question.id)
            .is_some_and(|a| !a.trim().is_empty());
        if !answered {
            errors.add(
                &format!("answers.{}", question.id),
                "This question requires an answer",
            );
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  ada@mail.example.org "));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("a da@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = validate_login(&LoginForm {
            email: "ada@example.com".into(),
            password: "x".into(),
        });
        assert!(errors.is_empty());
    }

    #[test]
    fn test_register_password_rules() {
        let mut form = RegisterForm {
            email: "ada@example.com".into(),
            username: "ada_l".into(),
            password: "short1".into(),
            confirm_password: "short1".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_register(&form).get("password"),
            Some("Password must be at least 8 characters")
        );

        form.password = "longenough".into();
        form.confirm_password = "longenough".into();
        assert_eq!(
            validate_register(&form).get("password"),
            Some("Password must contain a letter and a digit")
        );

        form.password = "longenough1".into();
        assert_eq!(
            validate_register(&form).get("confirm_password"),
            Some("Passwords do not match")
        );

        form.confirm_password = "longenough1".into();
        assert!(validate_register(&form).is_empty());
    }

    #[test]
    fn test_username_rules() {
        let mut form = ProfileForm {
            username: "ab".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_profile(&form).get("username"),
            Some("Username must be 3 to 32 characters")
        );

        form.username = "ada lovelace".into();
        assert_eq!(
            validate_profile(&form).get("username"),
            Some("Username may only contain letters, digits, '_' and '-'")
        );

        form.username = "ada-lovelace_1".into();
        form.avatar_url = "ftp://x".into();
        let errors = validate_profile(&form);
        assert!(errors.get("username").is_none());
        assert!(errors.get("avatar_url").is_some());
    }

    #[test]
    fn test_first_error_per_field_wins_and_server_merge() {
        let mut errors = FieldErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");
        assert_eq!(errors.get("email"), Some("first"));

        let server = BTreeMap::from([
            ("email".to_string(), vec!["taken".to_string()]),
            ("username".to_string(), vec!["already exists".to_string()]),
        ]);
        errors.merge_server(&server);
        assert_eq!(errors.get("email"), Some("first"));
        assert_eq!(errors.get("username"), Some("already exists"));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first(), Some("first"));
    }

    #[test]
    fn test_response_required_questions() {
        let questions = vec![
            Question {
                id: 1,
                vacancy_id: 9,
                text: "Why?".into(),
                required: true,
            },
            Question {
                id: 2,
                vacancy_id: 9,
                text: "Anything else?".into(),
                required: false,
            },
        ];
        let mut answers = BTreeMap::new();
        answers.insert(1, "   ".to_string());

        let errors = validate_response(&questions, &answers, "Hello");
        assert!(errors.get("answers.1").is_some());
        assert!(errors.get("answers.2").is_none());

        answers.insert(1, "Because".to_string());
        assert!(validate_response(&questions, &answers, "Hello").is_empty());
        assert!(validate_response(&questions, &answers, " ").get("cover_letter").is_some());
    }

    #[test]
    fn test_urls() {
        assert!(is_valid_url("https://github.com/ada/engine"));
        assert!(is_valid_url("http://localhost:3000"));
        assert!(!is_valid_url("github.com/ada"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https:///path"));
    }
}
