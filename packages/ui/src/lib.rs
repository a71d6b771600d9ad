//! This crate contains all shared UI for the workspace: context providers for the
//! API client, session, notifications and dashboard layout, plus the component kit
//! the web pages are assembled from.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::FaGithub;
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod storage;
pub use storage::make_store;

pub mod api_context;
pub use api_context::{use_api, use_query, Api, ApiProvider};

mod auth;
pub use auth::{register, sign_in, sign_out, use_auth, AuthProvider, AuthState, LogoutButton};

pub mod notifications;
pub use notifications::{use_notifications, Notifications, ToastLevel, ToastProvider};

mod dashboard;
pub use dashboard::{use_dashboard, DashboardProvider};
