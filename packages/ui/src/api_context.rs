//! API context: the shared client, query cache and cache revision.

use std::future::Future;
use std::time::Duration;

use api::{ApiClient, ApiError, QueryClient};
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::cache::QueryKey;
use store::AppConfig;

const GC_INTERVAL: Duration = Duration::from_secs(60);

/// Copyable handle to the API client and query cache.
#[derive(Clone, Copy, PartialEq)]
pub struct Api {
    client: Signal<ApiClient>,
    queries: Signal<QueryClient>,
    config: Signal<AppConfig>,
    revision: Signal<u64>,
}

impl Api {
    pub fn client(&self) -> ApiClient {
        self.client.peek().clone()
    }

    pub fn queries(&self) -> QueryClient {
        self.queries.peek().clone()
    }

    pub fn config(&self) -> AppConfig {
        self.config.peek().clone()
    }

    /// Current cache revision. Reading it subscribes the caller to invalidations.
    pub fn revision(&self) -> u64 {
        (self.revision)()
    }

    /// Drop cached data for `resources` and re-run every mounted query.
    pub fn invalidate(&mut self, resources: &[store::Resource]) {
        let queries = self.queries();
        for resource in resources {
            queries.invalidate(*resource);
        }
        *self.revision.write() += 1;
    }

    /// Drop all cached data, e.g. when the signed-in user changes.
    pub fn reset(&mut self) {
        self.queries().clear();
        *self.revision.write() += 1;
    }
}

pub fn use_api() -> Api {
    use_context::<Api>()
}

/// Provides [`Api`] to the tree and garbage-collects the query cache.
#[component]
pub fn ApiProvider(
    client: ApiClient,
    queries: QueryClient,
    config: AppConfig,
    children: Element,
) -> Element {
    let handle = use_context_provider(|| Api {
        client: Signal::new(client),
        queries: Signal::new(queries),
        config: Signal::new(config),
        revision: Signal::new(0),
    });

    use_future(move || async move {
        loop {
            api::runtime::sleep(GC_INTERVAL).await;
            let removed = handle.queries().gc();
            if removed > 0 {
                tracing::debug!(removed, "Collected stale queries");
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Run a cached query.
///
/// `key` and `fetcher` are re-evaluated when a signal they read changes or when
/// the cache revision moves.
pub fn use_query<T, K, F, Fut>(key: K, fetcher: F) -> Resource<Result<T, ApiError>>
where
    T: Serialize + DeserializeOwned + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_api();
    let notifications = crate::notifications::use_notifications();

    use_resource(move || {
        let _ = api.revision();
        let key = key();
        let request = fetcher(api.client());
        let queries = api.queries();
        async move {
            let result = queries.fetch(key, move || request).await;
            if let Err(e) = &result {
                notifications.report_error(e);
            }
            result
        }
    })
}
