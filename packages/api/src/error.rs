//! Error types for the ProjectHub REST client.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Errors returned by [`crate::ApiClient`] and the query layer.
///
/// `Clone` so a single failure can be shared by every caller joined on the same
/// in-flight query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Session expired and could not be refreshed
    #[error("Your session has expired, please sign in again")]
    Unauthorized,

    /// Authenticated user lacks access
    #[error("You do not have access to this resource")]
    Forbidden,

    /// Credentials were rejected
    #[error("{0}")]
    AuthFailed(String),

    /// 4xx response other than 401/403
    #[error("{message}")]
    Client {
        status: u16,
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    /// 5xx response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

const MESSAGE_KEYS: [&str; 3] = ["detail", "message", "error"];
const NON_FIELD_KEY: &str = "non_field_errors";

impl ApiError {
    /// HTTP status behind the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized | ApiError::AuthFailed(_) => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// 401/403 after the session was cleared.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden)
    }

    /// Transient failures worth another attempt. 4xx never are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout
                | ApiError::Unreachable(_)
                | ApiError::Transport(_)
                | ApiError::Server { .. }
        )
    }

    /// Per-field validation messages from a 4xx body.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ApiError::Client { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// Build the error for a non-success response.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (message, fields) = parse_error_body(body);
        if status >= 500 {
            return ApiError::Server {
                status,
                message: message.unwrap_or_else(|| default_message(status)),
            };
        }
        let message = match message {
            Some(message) => message,
            None if !fields.is_empty() => "Please correct the highlighted fields".to_string(),
            None => default_message(status),
        };
        ApiError::Client {
            status,
            message,
            fields,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ApiError::Timeout;
        }
        #[cfg(not(target_arch = "wasm32"))]
        if e.is_connect() {
            return ApiError::Unreachable(e.to_string());
        }
        if e.is_decode() {
            return ApiError::Parse(e.to_string());
        }
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

fn default_message(status: u16) -> String {
    match status {
        400 => "The request was invalid".to_string(),
        404 => "Not found".to_string(),
        409 => "This conflicts with existing data".to_string(),
        429 => "Too many requests, try again shortly".to_string(),
        s if s >= 500 => "Something went wrong on our side".to_string(),
        s => format!("Request failed with status {s}"),
    }
}

/// Human message carried by an error body, if any.
pub(crate) fn error_message(body: &str) -> Option<String> {
    parse_error_body(body).0
}

/// Pull a human message and DRF-style field errors out of an error body.
fn parse_error_body(body: &str) -> (Option<String>, BTreeMap<String, Vec<String>>) {
    let mut fields = BTreeMap::new();
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        let text = body.trim();
        let message = (!text.is_empty() && text.len() <= 200 && !text.starts_with('<'))
            .then(|| text.to_string());
        return (message, fields);
    };

    let mut message = MESSAGE_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    for (key, value) in &map {
        if MESSAGE_KEYS.contains(&key.as_str()) {
            continue;
        }
        let messages = string_list(value);
        if messages.is_empty() {
            continue;
        }
        if key == NON_FIELD_KEY {
            message.get_or_insert_with(|| messages[0].clone());
        } else {
            fields.insert(key.clone(), messages);
        }
    }
    (message, fields)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message() {
        let err = ApiError::from_response(404, r#"{"detail": "Project not found."}"#);
        assert_eq!(err.to_string(), "Project not found.");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_field_errors() {
        let err = ApiError::from_response(
            400,
            r#"{"email": ["A user with that email already exists."], "username": "Taken", "count": 3}"#,
        );
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["username"], vec!["Taken".to_string()]);
        assert_eq!(err.to_string(), "Please correct the highlighted fields");
    }

    #[test]
    fn test_non_field_errors_become_message() {
        let err = ApiError::from_response(
            400,
            r#"{"non_field_errors": ["Vacancy is closed."]}"#,
        );
        assert_eq!(err.to_string(), "Vacancy is closed.");
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let err = ApiError::from_response(502, "<html>Bad gateway</html>");
        assert!(matches!(err, ApiError::Server { status: 502, .. }));
        assert!(err.is_retryable());
        assert!(!err.is_client_error());
        assert!(ApiError::Timeout.is_retryable());
        assert!(!ApiError::Parse("eof".into()).is_retryable());
    }

    #[test]
    fn test_auth_errors() {
        assert!(ApiError::Unauthorized.is_auth_error());
        assert!(ApiError::Forbidden.is_auth_error());
        assert!(ApiError::Forbidden.is_client_error());
        assert!(!ApiError::AuthFailed("bad".into()).is_auth_error());
    }

    #[test]
    fn test_plain_text_body() {
        let err = ApiError::from_response(429, "slow down");
        assert_eq!(err.to_string(), "slow down");
        let err = ApiError::from_response(418, "");
        assert_eq!(err.to_string(), "Request failed with status 418");
    }
}
