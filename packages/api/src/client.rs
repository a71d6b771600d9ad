//! Main ProjectHub REST client.

use std::sync::Arc;
use std::time::Duration;

use futures_util::lock::Mutex;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::config::ApiConfig;
use store::tokens::TokenManager;
use tracing::{debug, info, warn};

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::dashboard::DashboardClient;
use crate::error::{error_message, ApiError, Result};
use crate::projects::ProjectsClient;
use crate::questions::QuestionsClient;
use crate::retry::RetryPolicy;
use crate::runtime;
use crate::users::UsersClient;
use crate::vacancies::VacanciesClient;

/// Typed client for the ProjectHub REST API.
///
/// Every request carries the stored bearer token and is wrapped in an abort
/// timeout. Failed reads are retried with exponential backoff; a 401 triggers a
/// single token refresh shared by all concurrent callers.
///
/// Cloning is cheap; clones share the HTTP client, token store and refresh lock.
///
/// # Example
///
/// ```ignore
/// let tokens = TokenManager::new(Arc::new(MemoryStore::new()));
/// let client = ApiClient::new(&AppConfig::default().api, tokens)?;
///
/// client.auth().login("ada@example.com", "secret123").await?;
/// let projects = client.projects().list(&ProjectQuery::default()).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    base_url: String,
    tokens: TokenManager,
    timeout: Duration,
    retry: RetryPolicy,
    refresh_lock: Mutex<()>,
}

/// A request that can be replayed for retries and after a token refresh.
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

impl ApiClient {
    /// Create a client for the API rooted at `config.base_url`.
    pub fn new(config: &ApiConfig, tokens: TokenManager) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url,
                tokens,
                timeout: config.timeout(),
                retry: RetryPolicy::from_config(config),
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    /// Get the normalized API root.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.inner.tokens
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.tokens.is_authenticated()
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(self)
    }

    pub fn projects(&self) -> ProjectsClient<'_> {
        ProjectsClient::new(self)
    }

    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(self)
    }

    pub fn vacancies(&self) -> VacanciesClient<'_> {
        VacanciesClient::new(self)
    }

    pub fn questions(&self) -> QuestionsClient<'_> {
        QuestionsClient::new(self)
    }

    pub fn dashboard(&self) -> DashboardClient<'_> {
        DashboardClient::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        let body = self
            .send(&RequestSpec::new(Method::GET, path).query(query))
            .await?;
        decode(&body)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(&RequestSpec::new(Method::POST, path).json(payload)?)
            .await?;
        decode(&body)
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(&RequestSpec::new(Method::PATCH, path).json(payload)?)
            .await?;
        decode(&body)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(&RequestSpec::new(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Send an authenticated request, retrying reads on transient failures.
    async fn send(&self, spec: &RequestSpec) -> Result<String> {
        let retry = self.inner.retry;
        let mut attempt = 0;
        loop {
            match self.send_authorized(spec).await {
                Ok(body) => return Ok(body),
                Err(err) if spec.method == Method::GET && retry.should_retry(&err, attempt) => {
                    let delay = retry.delay_for(attempt);
                    warn!(
                        path = %spec.path,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    runtime::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_authorized(&self, spec: &RequestSpec) -> Result<String> {
        let token = self.inner.tokens.access_token();
        let (status, body) = self.send_once(spec, token.as_deref()).await?;

        if status == 401 && token.is_some() {
            if self.refresh_after(token.as_deref()).await {
                let token = self.inner.tokens.access_token();
                let (status, body) = self.send_once(spec, token.as_deref()).await?;
                return self.finish(status, body);
            }
            self.expire_session("refresh failed");
            return Err(ApiError::Unauthorized);
        }
        self.finish(status, body)
    }

    /// Send without a bearer token, without retries and without refresh.
    pub(crate) async fn send_public(&self, spec: &RequestSpec) -> Result<String> {
        let (status, body) = self.send_once(spec, None).await?;
        match status {
            200..=299 => Ok(body),
            401 | 403 => {
                let message = error_message(&body)
                    .unwrap_or_else(|| "Invalid email or password".to_string());
                Err(ApiError::AuthFailed(message))
            }
            _ => Err(ApiError::from_response(status, &body)),
        }
    }

    fn finish(&self, status: u16, body: String) -> Result<String> {
        match status {
            200..=299 => Ok(body),
            401 => {
                self.expire_session("unauthorized");
                Err(ApiError::Unauthorized)
            }
            403 => {
                self.expire_session("forbidden");
                Err(ApiError::Forbidden)
            }
            _ => Err(ApiError::from_response(status, &body)),
        }
    }

    /// Refresh the access token unless another caller already replaced `stale`.
    async fn refresh_after(&self, stale: Option<&str>) -> bool {
        let _guard = self.inner.refresh_lock.lock().await;

        let current = self.inner.tokens.access_token();
        if current.is_some() && current.as_deref() != stale {
            debug!("Access token already refreshed");
            return true;
        }
        let Some(refresh_token) = self.inner.tokens.refresh_token() else {
            return false;
        };

        warn!("Access token rejected, attempting refresh");
        match self.auth().refresh(&refresh_token).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                false
            }
        }
    }

    fn expire_session(&self, reason: &str) {
        if self.inner.tokens.is_authenticated() || self.inner.tokens.refresh_token().is_some() {
            info!(reason, "Clearing stored session");
        }
        self.inner.tokens.clear();
    }

    async fn send_once(&self, spec: &RequestSpec, token: Option<&str>) -> Result<(u16, String)> {
        let url = self.url(&spec.path);
        debug!(method = %spec.method, url = %url, "Sending request");

        let mut request = self.inner.http.request(spec.method.clone(), &url);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match runtime::timeout(self.inner.timeout, exchange).await {
            Some(Ok((status, body))) => {
                debug!(status, url = %url, "Received response");
                Ok((status, body))
            }
            Some(Err(e)) => Err(ApiError::from(e)),
            None => {
                warn!(url = %url, timeout_ms = self.inner.timeout.as_millis() as u64, "Request timed out");
                Err(ApiError::Timeout)
            }
        }
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Decode a JSON body. An empty body decodes as `null`, which suits `()`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
    }
    let url = url.trim_end_matches('/');
    let host = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| ApiError::InvalidUrl("URL must start with http:// or https://".into()))?;
    if host.is_empty() || host.starts_with('/') {
        return Err(ApiError::InvalidUrl("URL has no host".into()));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(normalize_base_url("https://api.example.com/api/v1").is_ok());
        assert!(normalize_base_url("http://localhost:8000").is_ok());

        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("   ").is_err());
        assert!(normalize_base_url("api.example.com").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert!(normalize_base_url("https://").is_err());
    }

    #[test]
    fn test_url_normalization() {
        assert_eq!(
            normalize_base_url(" https://example.com/api/v1/ ").unwrap(),
            "https://example.com/api/v1"
        );
    }

    #[test]
    fn test_request_paths_keep_version_segment() {
        let config = ApiConfig {
            base_url: "https://example.com/api/v1//".to_string(),
            ..ApiConfig::default()
        };
        let tokens = TokenManager::new(Arc::new(store::MemoryStore::new()));
        let client = ApiClient::new(&config, tokens).unwrap();
        assert_eq!(client.base_url(), "https://example.com/api/v1");
        assert_eq!(client.url("projects/3"), "https://example.com/api/v1/projects/3");
        assert_eq!(client.url("/auth/login"), "https://example.com/api/v1/auth/login");
    }

    #[test]
    fn test_decode_empty_body() {
        assert!(decode::<()>("").is_ok());
        assert_eq!(decode::<Option<i64>>("  ").unwrap(), None);
        assert!(matches!(decode::<Vec<i64>>("{"), Err(ApiError::Parse(_))));
    }
}
