//! # Client configuration: `projecthub.toml`
//!
//! The web build embeds `projecthub.toml` and parses it at startup. Every section
//! and field has a default, so a missing or partial file is equivalent to the
//! default configuration.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api/v1"   # versioned REST root
//! timeout_secs = 15                           # per-request abort timeout
//! max_retries = 3                             # retries for failed GETs (never 4xx)
//! retry_base_delay_ms = 1000                  # doubled per attempt, capped at 30s
//!
//! [cache]
//! stale_secs = 30    # cached data younger than this is served without a request
//! gc_secs = 300      # entries older than this are dropped
//!
//! [search]
//! debounce_ms = 300
//! min_chars = 2
//! max_suggestions = 8
//!
//! [session]
//! check_interval_secs = 300   # 0 disables the periodic users/me check
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AppConfig`] | Top-level config with TOML (de)serialisation and builder helpers. |
//! | [`ApiConfig`] | REST endpoint, timeout and retry knobs. |
//! | [`CacheConfig`] | Request-cache stale and gc windows. |
//! | [`SearchConfig`] | Autocomplete debounce and limits. |
//! | [`SessionConfig`] | Background session revalidation. |

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `projecthub.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    #[serde(default = "default_gc_secs")]
    pub gc_secs: u64,
}

fn default_stale_secs() -> u64 {
    30
}

fn default_gc_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            gc_secs: default_gc_secs(),
        }
    }
}

impl CacheConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }

    pub fn gc_after(&self) -> Duration {
        Duration::from_secs(self.gc_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_chars() -> usize {
    2
}

fn default_max_suggestions() -> usize {
    8
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_chars: default_min_chars(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds between background `users/me` checks. 0 disables them.
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
}

fn default_check_interval() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval(),
        }
    }
}

impl AppConfig {
    /// Builder method to point the client at another API root.
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api.base_url = url.trim().to_string();
        self
    }

    /// Builder method to set the retry budget.
    pub fn with_retries(mut self, max_retries: u32, base_delay_ms: u64) -> Self {
        self.api.max_retries = max_retries;
        self.api.retry_base_delay_ms = base_delay_ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "projecthub.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
