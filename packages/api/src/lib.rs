//! # API crate: typed REST client for ProjectHub
//!
//! Every page in the web frontend talks to the backend through [`ApiClient`]. The
//! client owns the HTTP connection, attaches the bearer token kept by
//! [`store::TokenManager`], retries failed reads and refreshes expired sessions.
//! [`QueryClient`] sits on top and caches results per [`store::QueryKey`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `ApiClient`: URL validation, request pipeline, abort timeout, 401 refresh, 401/403 session clearing |
//! | [`auth`] | `auth/login`, `auth/register`, `auth/refresh`, `auth/logout` |
//! | [`users`] | `users/me`, `users/{id}` |
//! | [`projects`] | `projects` CRUD and the signed-in user's projects |
//! | [`catalog`] | `tags`, `technologies` |
//! | [`vacancies`] | `vacancies` CRUD, applications and their status |
//! | [`questions`] | Screening questions per vacancy |
//! | [`dashboard`] | `dashboard/*` aggregates |
//! | [`query`] | `QueryClient` cache with in-flight de-duplication, canonical [`keys`] |
//! | [`error`] | `ApiError` taxonomy and error-body parsing |
//! | [`retry`] | Exponential backoff policy for reads |
//! | [`runtime`] | `sleep` and `timeout` for native and wasm targets |
//! | [`types`] | Wire-only request/response payloads |
//!
//! ## Error policy
//!
//! - 4xx responses are never retried and surface as [`ApiError::Client`].
//! - Timeouts, transport failures and 5xx responses on GET requests are retried up
//!   to `max_retries` times with exponential backoff.
//! - 401 triggers one refresh with the stored refresh token; if that fails the
//!   tokens are cleared and [`ApiError::Unauthorized`] is returned. 403 clears the
//!   tokens and returns [`ApiError::Forbidden`].

pub mod auth;
pub mod catalog;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod projects;
pub mod query;
pub mod questions;
pub mod retry;
pub mod runtime;
pub mod types;
pub mod users;
pub mod vacancies;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use query::{keys, QueryClient};
pub use retry::RetryPolicy;
pub use types::{
    AuthResponse, LoginRequest, NewResponse, ProjectQuery, RegisterRequest, UpdateProfile,
    UpdateProject, UpdateVacancy,
};

pub use store::{AppConfig, TokenManager};
