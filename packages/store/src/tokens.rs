//! Bearer token storage for the current session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::kv::KeyValueStore;

const ACCESS_TOKEN_KEY: &str = "projecthub.access_token";
const REFRESH_TOKEN_KEY: &str = "projecthub.refresh_token";

/// Tokens issued by `auth/login`, `auth/register` and `auth/refresh`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Stores, retrieves and clears the session's tokens.
///
/// Cloning is cheap; clones share the underlying store.
#[derive(Clone)]
pub struct TokenManager {
    store: Arc<dyn KeyValueStore>,
}

impl TokenManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Replace both tokens. A pair without a refresh token drops the stored one.
    pub fn set_tokens(&self, tokens: &TokenPair) {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token);
        match &tokens.refresh_token {
            Some(refresh) => self.store.set(REFRESH_TOKEN_KEY, refresh),
            None => self.store.remove(REFRESH_TOKEN_KEY),
        }
    }

    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn manager() -> (MemoryStore, TokenManager) {
        let store = MemoryStore::new();
        let tokens = TokenManager::new(Arc::new(store.clone()));
        (store, tokens)
    }

    #[test]
    fn test_set_and_clear() {
        let (store, tokens) = manager();
        assert!(!tokens.is_authenticated());

        tokens.set_tokens(&TokenPair {
            access_token: "access-1".into(),
            refresh_token: Some("refresh-1".into()),
        });
        assert!(tokens.is_authenticated());
        assert_eq!(tokens.access_token().as_deref(), Some("access-1"));
        assert_eq!(tokens.refresh_token().as_deref(), Some("refresh-1"));

        tokens.clear();
        assert!(!tokens.is_authenticated());
        assert!(tokens.refresh_token().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_pair_without_refresh_drops_old_refresh() {
        let (_, tokens) = manager();
        tokens.set_tokens(&TokenPair {
            access_token: "a".into(),
            refresh_token: Some("r".into()),
        });
        tokens.set_tokens(&TokenPair {
            access_token: "b".into(),
            refresh_token: None,
        });
        assert_eq!(tokens.access_token().as_deref(), Some("b"));
        assert!(tokens.refresh_token().is_none());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let (store, tokens) = manager();
        store.set(ACCESS_TOKEN_KEY, "");
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn test_token_pair_wire_format() {
        let pair: TokenPair = serde_json::from_str(r#"{"access_token":"x"}"#).unwrap();
        assert_eq!(pair.access_token, "x");
        assert!(pair.refresh_token.is_none());
    }
}
