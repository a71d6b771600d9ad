//! # Domain models for marketplace resources
//!
//! Mirrors the REST resources served by the ProjectHub API one-to-one. Every type
//! is `Serialize + Deserialize` so it can be decoded straight from response bodies
//! and cached as JSON by the query layer.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The signed-in account as returned by `users/me`. |
//! | [`UserSummary`] | Compact user reference nested in projects and responses. |
//! | [`Tag`] / [`Technology`] | Catalog entries attached to projects, vacancies and profiles. |
//! | [`Project`] | A marketplace listing with its tags, technologies and open vacancy count. |
//! | [`Vacancy`] | A role inside a project, carrying its screening [`Question`]s. |
//! | [`VacancyResponse`] | An application to a vacancy, including [`Answer`]s. |
//! | [`DashboardStats`] | Counters shown on the dashboard. |
//!
//! Absent arrays decode as empty and unknown fields are ignored, so the client keeps
//! working when the API adds fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier type used by every resource.
pub type Id = i64;

/// The authenticated account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<Technology>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full name, falling back to the username when no name is set.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn initials(&self) -> String {
        crate::format::initials(&self.display_name())
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Compact user reference embedded in other resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: Id,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Technology {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Lifecycle state of a project listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    #[default]
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Draft,
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Archived,
    ];

    /// Wire name, also used in URLs and `<select>` values.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "Draft",
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Archived => "Archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// A marketplace project listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub owner: UserSummary,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub open_vacancies: u32,
    #[serde(default)]
    pub repository_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn has_tag(&self, id: Id) -> bool {
        self.tags.iter().any(|t| t.id == id)
    }

    pub fn uses_technology(&self, id: Id) -> bool {
        self.technologies.iter().any(|t| t.id == id)
    }

    pub fn is_owned_by(&self, user_id: Id) -> bool {
        self.owner.id == user_id
    }
}

/// A role that a project is recruiting for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: Id,
    pub project_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_open: bool,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// A screening question attached to a vacancy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Id,
    pub vacancy_id: Id,
    pub text: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Pending => "pending",
            ResponseStatus::Accepted => "accepted",
            ResponseStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResponseStatus::Pending => "Pending",
            ResponseStatus::Accepted => "Accepted",
            ResponseStatus::Rejected => "Rejected",
        }
    }
}

/// An answer to a single vacancy question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: Id,
    pub text: String,
}

/// An application submitted to a vacancy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: Id,
    pub vacancy_id: Id,
    pub applicant: UserSummary,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub status: ResponseStatus,
    pub created_at: DateTime<Utc>,
}

/// Counters returned by `dashboard/stats`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub projects: u32,
    #[serde(default)]
    pub open_vacancies: u32,
    #[serde(default)]
    pub responses_received: u32,
    #[serde(default)]
    pub responses_sent: u32,
    #[serde(default)]
    pub pending_responses: u32,
}
