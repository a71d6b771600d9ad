//! # Query client: request cache with in-flight de-duplication
//!
//! [`QueryClient::fetch`] resolves a [`QueryKey`] in three steps:
//!
//! 1. a fresh cached value is returned without touching the network;
//! 2. otherwise, if a request for the same key is already running, the caller joins it;
//! 3. otherwise a new request starts and its result is cached on success.
//!
//! Values are cached as `serde_json::Value`, so one cache serves every resource type.
//! Mutations call [`QueryClient::invalidate`] for the resources they touch; a request
//! that was in flight across an invalidation does not write its (now stale) result.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures_util::future::{LocalBoxFuture, Shared};
use futures_util::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::cache::{QueryCache, QueryKey, Resource};
use store::config::CacheConfig;
use tracing::debug;

use crate::error::{ApiError, Result};

type SharedFetch = Shared<LocalBoxFuture<'static, Result<Value>>>;

/// Cache plus in-flight registry. Cloning shares both.
#[derive(Clone)]
pub struct QueryClient {
    cache: QueryCache<Value>,
    in_flight: Rc<RefCell<HashMap<QueryKey, SharedFetch>>>,
    generation: Rc<Cell<u64>>,
}

impl QueryClient {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            cache: QueryCache::new(config.stale_after(), config.gc_after()),
            in_flight: Rc::new(RefCell::new(HashMap::new())),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Cached value for `key`, joined request, or a new request via `fetcher`.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + 'static,
    {
        if let Some(value) = self.cache.get(&key) {
            debug!(key = %key, "Query cache hit");
            return from_value(value);
        }

        let shared = self.join_or_start(&key, fetcher);
        let result = shared.clone().await;
        self.settle(&key, &shared);
        from_value(result?)
    }

    fn join_or_start<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> SharedFetch
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + 'static,
    {
        let mut in_flight = self.in_flight.borrow_mut();
        if let Some(existing) = in_flight.get(key) {
            debug!(key = %key, "Joining in-flight query");
            return existing.clone();
        }

        debug!(key = %key, "Starting query");
        let request = fetcher();
        let cache = self.cache.clone();
        let generation = self.generation.clone();
        let started_at = generation.get();
        let cache_key = key.clone();

        let shared = async move {
            let value = serde_json::to_value(request.await?)?;
            if generation.get() == started_at {
                cache.insert(cache_key, value.clone());
            }
            Ok::<_, ApiError>(value)
        }
        .boxed_local()
        .shared();

        in_flight.insert(key.clone(), shared.clone());
        shared
    }

    /// Drop the registry entry once its request has completed.
    fn settle(&self, key: &QueryKey, finished: &SharedFetch) {
        let mut in_flight = self.in_flight.borrow_mut();
        if in_flight
            .get(key)
            .is_some_and(|current| current.ptr_eq(finished))
        {
            in_flight.remove(key);
        }
    }

    /// Seed the cache, e.g. with the body of a successful mutation.
    pub fn set<T: Serialize>(&self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => self.cache.insert(key, value),
            Err(e) => debug!(key = %key, error = %e, "Skipping uncacheable value"),
        }
    }

    /// Forget every cached and in-flight query of `resource`.
    pub fn invalidate(&self, resource: Resource) -> usize {
        self.bump();
        self.in_flight
            .borrow_mut()
            .retain(|key, _| key.resource != resource);
        let removed = self.cache.invalidate_resource(resource);
        debug!(resource = resource.as_str(), removed, "Invalidated queries");
        removed
    }

    pub fn clear(&self) {
        self.bump();
        self.in_flight.borrow_mut().clear();
        self.cache.clear();
    }

    /// Drop long-unused entries.
    pub fn gc(&self) -> usize {
        self.cache.gc()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.borrow().len()
    }

    fn bump(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.in_flight, &other.in_flight)
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(ApiError::from)
}

/// Canonical keys for every cached query.
pub mod keys {
    use store::cache::{QueryKey, Resource};
    use store::models::Id;

    use crate::types::ProjectQuery;

    pub fn me() -> QueryKey {
        QueryKey::new(Resource::Me)
    }

    pub fn user(id: Id) -> QueryKey {
        QueryKey::new(Resource::Users).with("id", id)
    }

    pub fn projects(query: &ProjectQuery) -> QueryKey {
        query
            .params()
            .into_iter()
            .fold(QueryKey::new(Resource::Projects), |key, (k, v)| {
                key.with(&k, v)
            })
    }

    pub fn project(id: Id) -> QueryKey {
        QueryKey::new(Resource::Project).with("id", id)
    }

    pub fn tags(search: Option<&str>) -> QueryKey {
        QueryKey::new(Resource::Tags).with("search", search.unwrap_or_default().trim())
    }

    pub fn technologies(search: Option<&str>) -> QueryKey {
        QueryKey::new(Resource::Technologies).with("search", search.unwrap_or_default().trim())
    }

    pub fn vacancies(project_id: Id) -> QueryKey {
        QueryKey::new(Resource::Vacancies).with("project", project_id)
    }

    pub fn vacancy(id: Id) -> QueryKey {
        QueryKey::new(Resource::Vacancy).with("id", id)
    }

    pub fn questions(vacancy_id: Id) -> QueryKey {
        QueryKey::new(Resource::Questions).with("vacancy", vacancy_id)
    }

    pub fn responses(vacancy_id: Id) -> QueryKey {
        QueryKey::new(Resource::Responses).with("vacancy", vacancy_id)
    }

    pub fn my_responses() -> QueryKey {
        QueryKey::new(Resource::Responses).with("scope", "mine")
    }

    pub fn dashboard_stats() -> QueryKey {
        QueryKey::new(Resource::Dashboard).with("view", "stats")
    }

    pub fn dashboard_projects() -> QueryKey {
        QueryKey::new(Resource::Dashboard).with("view", "projects")
    }

    pub fn dashboard_responses() -> QueryKey {
        QueryKey::new(Resource::Dashboard).with("view", "responses")
    }
}
