//! HTTP pipeline tests for the ProjectHub client.
//!
//! These tests run the client against a mock server to verify token handling,
//! retries, session clearing and query de-duplication.

use std::sync::Arc;
use std::time::Duration;

use api::{keys, ApiClient, ApiError, ProjectQuery, QueryClient};
use serde_json::{json, Value};
use store::cache::Resource;
use store::config::{ApiConfig, CacheConfig};
use store::tokens::{TokenManager, TokenPair};
use store::MemoryStore;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api/v1/", server.uri()),
        timeout_secs: 2,
        max_retries: 3,
        retry_base_delay_ms: 1,
    }
}

fn client_with(server: &MockServer, tokens: Option<TokenPair>) -> (ApiClient, TokenManager) {
    let manager = TokenManager::new(Arc::new(MemoryStore::new()));
    if let Some(tokens) = tokens {
        manager.set_tokens(&tokens);
    }
    let client = ApiClient::new(&config(server), manager.clone()).expect("valid url");
    (client, manager)
}

fn signed_in(access: &str, refresh: Option<&str>) -> Option<TokenPair> {
    Some(TokenPair {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
    })
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "email": "ada@example.com",
        "username": "ada",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "created_at": "2025-01-10T09:00:00Z"
    })
}

fn project_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "short_description": "A short pitch",
        "status": "active",
        "owner": {"id": 1, "username": "ada"},
        "tags": [{"id": 1, "name": "web"}],
        "open_vacancies": 2,
        "created_at": "2025-01-10T09:00:00Z",
        "updated_at": "2025-01-11T09:00:00Z"
    })
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    fn with_url(url: &str) -> Result<ApiClient, ApiError> {
        let config = ApiConfig {
            base_url: url.to_string(),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, TokenManager::new(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn test_valid_urls() {
        assert!(with_url("https://api.example.com/api/v1").is_ok());
        assert!(with_url("http://localhost:8000/api/v1").is_ok());
    }

    #[test]
    fn test_invalid_urls_rejected() {
        for url in ["", "api.example.com", "ftp://example.com"] {
            match with_url(url) {
                Err(ApiError::InvalidUrl(_)) => {}
                other => panic!("Expected InvalidUrl for {url:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_trailing_slash_removed() {
        let client = with_url("https://api.example.com/api/v1/").unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/api/v1");
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .and(body_json(json!({"email": "ada@example.com", "password": "secret123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": "access-1",
                "refresh": "refresh-1",
                "user": user_json()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, None);
        let response = client
            .auth()
            .login(" ada@example.com ", "secret123")
            .await
            .unwrap();

        assert_eq!(response.user.unwrap().username, "ada");
        assert_eq!(tokens.access_token().as_deref(), Some("access-1"));
        assert_eq!(tokens.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, None);
        let err = client.auth().login("ada@example.com", "nope").await.unwrap_err();

        assert_eq!(err, ApiError::AuthFailed("Invalid email or password".into()));
        assert!(!tokens.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_tokens_even_if_server_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, signed_in("a", Some("r")));
        client.auth().logout().await;
        assert!(!tokens.is_authenticated());
        assert_eq!(tokens.refresh_token(), None);
    }

    #[tokio::test]
    async fn test_bearer_header_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .and(header("Authorization", "Bearer access-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_with(&server, signed_in("access-1", None));
        let me = client.users().me().await.unwrap();
        assert_eq!(me.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_expired_token_refreshed_and_request_replayed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .and(header("Authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/refresh"))
            .and(body_json(json!({"refresh_token": "refresh-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, signed_in("old", Some("refresh-1")));
        let me = client.users().me().await.unwrap();

        assert_eq!(me.id, 1);
        assert_eq!(tokens.access_token().as_deref(), Some("new"));
        assert_eq!(tokens.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_requests_share_one_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tags"))
            .and(header("Authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(50)))
            .expect(3)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access": "new"}))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tags"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "web"}])))
            .expect(3)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, signed_in("old", Some("refresh-1")));
        let catalog = client.catalog();
        let (a, b, c) = tokio::join!(catalog.tags(None), catalog.tags(None), catalog.tags(None));

        for tags in [a, b, c] {
            assert_eq!(tags.unwrap()[0].name, "web");
        }
        assert_eq!(tokens.access_token().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is invalid"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, signed_in("old", Some("refresh-1")));
        let err = client.users().me().await.unwrap_err();

        assert_eq!(err, ApiError::Unauthorized);
        assert!(err.is_auth_error());
        assert!(!tokens.is_authenticated());
        assert_eq!(tokens.refresh_token(), None);
    }

    #[tokio::test]
    async fn test_unauthorized_without_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/dashboard/stats"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, signed_in("old", None));
        let err = client.dashboard().stats().await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert!(!tokens.is_authenticated());
    }

    #[tokio::test]
    async fn test_forbidden_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/projects/9"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, signed_in("a", Some("r")));
        let err = client.projects().delete(9).await.unwrap_err();
        assert_eq!(err, ApiError::Forbidden);
        assert!(!tokens.is_authenticated());
    }
}

// =============================================================================
// Retry Tests
// =============================================================================

mod retries {
    use super::*;

    #[tokio::test]
    async fn test_client_errors_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Project not found."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_with(&server, None);
        let err = client.projects().get(404).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Project not found.");
    }

    #[tokio::test]
    async fn test_server_errors_retried_until_budget_spent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tags"))
            .respond_with(ResponseTemplate::new(503))
            .expect(4)
            .mount(&server)
            .await;

        let (client, _) = client_with(&server, None);
        let err = client.catalog().tags(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_transient_failure_recovers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/technologies"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/technologies"))
            .and(query_param("search", "ru"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "name": "Rust"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_with(&server, None);
        let technologies = client.catalog().technologies(Some("ru")).await.unwrap();
        assert_eq!(technologies[0].name, "Rust");
    }

    #[tokio::test]
    async fn test_mutations_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/vacancies/5/responses"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_with(&server, signed_in("a", None));
        let err = client
            .vacancies()
            .respond(5, &api::NewResponse::default())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_validation_errors_carry_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/users/me"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"username": ["This username is taken."]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, tokens) = client_with(&server, signed_in("a", None));
        let err = client
            .users()
            .update_me(&api::UpdateProfile::default())
            .await
            .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["username"], vec!["This username is taken.".to_string()]);
        assert!(tokens.is_authenticated());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/dashboard/stats"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let config = ApiConfig {
            timeout_secs: 1,
            max_retries: 0,
            ..config(&server)
        };
        let client =
            ApiClient::new(&config, TokenManager::new(Arc::new(MemoryStore::new()))).unwrap();
        let err = client.dashboard().stats().await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
    }
}

// =============================================================================
// Query Client Tests
// =============================================================================

mod queries {
    use super::*;
    use futures_util::future::join;
    use store::models::Project;

    #[tokio::test]
    async fn test_concurrent_queries_share_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([project_json(1, "Compiler"), project_json(2, "Editor")]))
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_with(&server, None);
        let queries = QueryClient::new(&CacheConfig::default());
        let query = ProjectQuery::default();

        let first = {
            let client = client.clone();
            let query = query.clone();
            queries.fetch(keys::projects(&query), move || async move {
                client.projects().list(&query).await
            })
        };
        let second = {
            let client = client.clone();
            let query = query.clone();
            queries.fetch(keys::projects(&query), move || async move {
                client.projects().list(&query).await
            })
        };
        let (a, b): (api::Result<Vec<Project>>, api::Result<Vec<Project>>) =
            join(first, second).await;

        assert_eq!(a.unwrap().len(), 2);
        assert_eq!(b.unwrap()[1].title, "Editor");
    }

    #[tokio::test]
    async fn test_invalidation_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_json(1, "Compiler")))
            .expect(2)
            .mount(&server)
            .await;

        let (client, _) = client_with(&server, None);
        let queries = QueryClient::new(&CacheConfig::default());

        for round in 0..3 {
            if round == 2 {
                queries.invalidate(Resource::Project);
            }
            let client = client.clone();
            let project: Project = queries
                .fetch(keys::project(1), move || async move {
                    client.projects().get(1).await
                })
                .await
                .unwrap();
            assert_eq!(project.open_vacancies, 2);
        }
    }
}
