//! Request and response payloads that only exist on the wire.
//!
//! Resource types themselves live in [`store::models`].

use serde::{Deserialize, Serialize};
use store::models::{Answer, Id, ProjectStatus, ResponseStatus, User};
use store::tokens::TokenPair;
use store::validation::{ProfileForm, RegisterForm};

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl From<&RegisterForm> for RegisterRequest {
    fn from(form: &RegisterForm) -> Self {
        Self {
            email: form.email.trim().to_string(),
            username: form.username.trim().to_string(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            password: form.password.clone(),
        }
    }
}

/// Login/register response.
///
/// Accepts both `access_token` and the shorter `access`/`refresh` names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    #[serde(alias = "access")]
    pub access_token: String,
    #[serde(default, alias = "refresh")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthResponse {
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token refresh response. A missing refresh token keeps the current one.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RefreshResponse {
    #[serde(alias = "access")]
    pub access_token: String,
    #[serde(default, alias = "refresh")]
    pub refresh_token: Option<String>,
}

/// Server-side filters for `GET projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub tags: Vec<Id>,
    pub technologies: Vec<Id>,
    pub owner: Option<Id>,
}

impl ProjectQuery {
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn owner(mut self, owner: Id) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Query-string pairs, omitting unset filters.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if !self.tags.is_empty() {
            params.push(("tags".to_string(), join_ids(&self.tags)));
        }
        if !self.technologies.is_empty() {
            params.push(("technologies".to_string(), join_ids(&self.technologies)));
        }
        if let Some(owner) = self.owner {
            params.push(("owner".to_string(), owner.to_string()));
        }
        params
    }
}

fn join_ids(ids: &[Id]) -> String {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids.iter()
        .map(Id::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Partial project update for `PATCH projects/{id}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<Id>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_ids: Option<Vec<Id>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

/// Partial vacancy update for `PATCH vacancies/{id}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateVacancy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_ids: Option<Vec<Id>>,
}

/// Profile update for `PATCH users/me`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_ids: Option<Vec<Id>>,
}

impl From<&ProfileForm> for UpdateProfile {
    fn from(form: &ProfileForm) -> Self {
        let optional = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            username: form.username.trim().to_string(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            bio: optional(&form.bio),
            avatar_url: optional(&form.avatar_url),
            skill_ids: None,
        }
    }
}

/// Application to a vacancy.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NewResponse {
    pub cover_letter: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResponseStatusUpdate {
    pub status: ResponseStatus,
}

/// List endpoints may answer with a bare array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Plain(items) | ListPayload::Paged { results: items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::models::Tag;

    #[test]
    fn test_auth_response_aliases() {
        let short: AuthResponse =
            serde_json::from_str(r#"{"access": "a1", "refresh": "r1"}"#).unwrap();
        assert_eq!(short.tokens().access_token, "a1");
        assert_eq!(short.tokens().refresh_token.as_deref(), Some("r1"));
        assert!(short.user.is_none());

        let long: AuthResponse = serde_json::from_str(r#"{"access_token": "a2"}"#).unwrap();
        assert_eq!(long.refresh_token, None);
    }

    #[test]
    fn test_project_query_params() {
        let query = ProjectQuery {
            tags: vec![3, 1, 3],
            ..ProjectQuery::default()
        }
        .search("  rust  ")
        .status(ProjectStatus::Active);
        assert_eq!(
            query.params(),
            vec![
                ("search".to_string(), "rust".to_string()),
                ("status".to_string(), "active".to_string()),
                ("tags".to_string(), "1,3".to_string()),
            ]
        );
        assert!(ProjectQuery::default().search("   ").params().is_empty());
    }

    #[test]
    fn test_update_project_skips_unset_fields() {
        let update = UpdateProject {
            title: Some("New title".into()),
            ..UpdateProject::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"title": "New title"})
        );
    }

    #[test]
    fn test_profile_from_form() {
        let form = ProfileForm {
            username: " ada ".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            bio: "   ".into(),
            avatar_url: "https://example.com/a.png".into(),
        };
        let update = UpdateProfile::from(&form);
        assert_eq!(update.username, "ada");
        assert_eq!(update.bio, None);
        assert_eq!(update.avatar_url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_list_payload_shapes() {
        let plain: ListPayload<Tag> = serde_json::from_str(r#"[{"id": 1, "name": "web"}]"#).unwrap();
        assert_eq!(plain.into_vec().len(), 1);
        let paged: ListPayload<Tag> =
            serde_json::from_str(r#"{"count": 1, "results": [{"id": 1, "name": "web"}]}"#).unwrap();
        assert_eq!(paged.into_vec()[0].name, "web");
    }
}
