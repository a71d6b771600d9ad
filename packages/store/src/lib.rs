pub mod cache;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod filter;
pub mod format;
pub mod kv;
pub mod models;
pub mod search;
pub mod tokens;
pub mod validation;
pub mod wizard;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use cache::{QueryCache, QueryKey, Resource};
pub use config::AppConfig;
pub use dashboard::{DashboardPrefs, Widget};
pub use filter::{ProjectFilter, ProjectSort};
pub use kv::KeyValueStore;
pub use models::{
    Answer, DashboardStats, Id, Project, ProjectStatus, Question, ResponseStatus, Tag,
    Technology, User, UserSummary, Vacancy, VacancyResponse,
};
pub use tokens::{TokenManager, TokenPair};
pub use validation::FieldErrors;
pub use wizard::{NewProject, NewQuestion, NewVacancy, ProjectDraft, ProjectWizard, WizardStep};
