//! # Request cache
//!
//! [`QueryCache`] holds the client's ephemeral copies of server resources. Entries
//! are keyed by [`QueryKey`] (resource type plus query parameters) and timestamped
//! when written:
//!
//! - younger than the stale time → served by [`get`](QueryCache::get) without a request;
//! - older than the stale time → still readable through [`get_stale`](QueryCache::get_stale)
//!   (e.g. to show something while refetching);
//! - older than the gc window → dropped by [`gc`](QueryCache::gc).
//!
//! Mutations invalidate every key of the affected resource with
//! [`invalidate_resource`](QueryCache::invalidate_resource).
//!
//! The cache is a plain data structure behind an `Arc<Mutex<_>>`; request
//! de-duplication lives one level up in `api::QueryClient`. Methods with an `_at`
//! suffix take the current time explicitly.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Resource types the client caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Me,
    Users,
    Projects,
    Project,
    Tags,
    Technologies,
    Vacancies,
    Vacancy,
    Questions,
    Responses,
    Dashboard,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Me => "me",
            Resource::Users => "users",
            Resource::Projects => "projects",
            Resource::Project => "project",
            Resource::Tags => "tags",
            Resource::Technologies => "technologies",
            Resource::Vacancies => "vacancies",
            Resource::Vacancy => "vacancy",
            Resource::Questions => "questions",
            Resource::Responses => "responses",
            Resource::Dashboard => "dashboard",
        }
    }
}

/// Cache key: resource type plus normalized query parameters.
///
/// Parameters are kept sorted, so keys built in different orders are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    pub resource: Resource,
    pub params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: BTreeMap::new(),
        }
    }

    /// Builder: add a parameter. Empty values are skipped.
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.params.insert(key.to_string(), value);
        }
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource.as_str())?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    written_at: DateTime<Utc>,
}

/// Timestamped, resource-keyed cache of query results.
#[derive(Clone, Debug)]
pub struct QueryCache<V> {
    entries: Arc<Mutex<HashMap<QueryKey, Entry<V>>>>,
    stale_after: Duration,
    gc_after: Duration,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(stale_after: Duration, gc_after: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            stale_after,
            gc_after: gc_after.max(stale_after),
        }
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &QueryKey, now: DateTime<Utc>) -> Option<V> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        if age(entry.written_at, now) < self.stale_after {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Value for `key` regardless of age.
    pub fn get_stale(&self, key: &QueryKey) -> Option<V> {
        self.entries.lock().ok()?.get(key).map(|e| e.value.clone())
    }

    pub fn insert(&self, key: QueryKey, value: V) {
        self.insert_at(key, value, Utc::now());
    }

    pub fn insert_at(&self, key: QueryKey, value: V, now: DateTime<Utc>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                Entry {
                    value,
                    written_at: now,
                },
            );
        }
    }

    /// Drop every entry of `resource`, whatever its parameters.
    pub fn invalidate_resource(&self, resource: Resource) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|k, _| k.resource != resource);
        before - entries.len()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Remove entries past the gc window. Returns how many were dropped.
    pub fn gc(&self) -> usize {
        self.gc_at(Utc::now())
    }

    pub fn gc_at(&self, now: DateTime<Utc>) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let before = entries.len();
        let gc_after = self.gc_after;
        entries.retain(|_, e| age(e.written_at, now) < gc_after);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn age(written_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - written_at).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn cache() -> QueryCache<String> {
        QueryCache::new(Duration::from_secs(30), Duration::from_secs(300))
    }

    #[test]
    fn test_key_param_order_is_irrelevant() {
        let a = QueryKey::new(Resource::Projects)
            .with("status", "active")
            .with("search", "rust");
        let b = QueryKey::new(Resource::Projects)
            .with("search", "rust")
            .with("status", "active");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "projects?search=rust&status=active");
    }

    #[test]
    fn test_empty_params_are_skipped() {
        let key = QueryKey::new(Resource::Tags).with("search", "");
        assert!(key.params.is_empty());
        assert_eq!(key.to_string(), "tags");
    }

    #[test]
    fn test_fresh_then_stale() {
        let cache = cache();
        let key = QueryKey::new(Resource::Me);
        let t0 = Utc::now();
        cache.insert_at(key.clone(), "ada".into(), t0);

        assert_eq!(cache.get_at(&key, t0 + TimeDelta::seconds(10)).as_deref(), Some("ada"));
        assert!(cache.get_at(&key, t0 + TimeDelta::seconds(31)).is_none());
        assert_eq!(cache.get_stale(&key).as_deref(), Some("ada"));
    }

    #[test]
    fn test_invalidate_resource_keeps_others() {
        let cache = cache();
        cache.insert(QueryKey::new(Resource::Projects).with("page", 1), "p1".into());
        cache.insert(QueryKey::new(Resource::Projects).with("page", 2), "p2".into());
        cache.insert(QueryKey::new(Resource::Tags), "tags".into());

        assert_eq!(cache.invalidate_resource(Resource::Projects), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&QueryKey::new(Resource::Tags)).is_some());
    }

    #[test]
    fn test_gc_drops_only_expired() {
        let cache = cache();
        let t0 = Utc::now();
        cache.insert_at(QueryKey::new(Resource::Tags), "old".into(), t0);
        cache.insert_at(
            QueryKey::new(Resource::Technologies),
            "new".into(),
            t0 + TimeDelta::seconds(200),
        );

        assert_eq!(cache.gc_at(t0 + TimeDelta::seconds(301)), 1);
        assert!(cache.get_stale(&QueryKey::new(Resource::Tags)).is_none());
        assert!(cache.get_stale(&QueryKey::new(Resource::Technologies)).is_some());
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = cache();
        cache.insert(QueryKey::new(Resource::Project).with("id", 4), "p".into());
        cache.insert(QueryKey::new(Resource::Me), "me".into());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
