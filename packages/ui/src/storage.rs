//! Shared key/value store constructor for all platforms.
//!
//! Returns a [`store::KeyValueStore`] backed by the appropriate backend:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStore`]
//! - **Native** (tests, non-web builds): a process-wide [`store::MemoryStore`]

use std::sync::Arc;

use store::KeyValueStore;

/// Create the platform-appropriate key/value store.
///
/// Every call on native targets returns a handle to the same in-memory map, so
/// tokens and preferences written through one handle are visible through another.
pub fn make_store() -> Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        use std::sync::OnceLock;

        static SHARED: OnceLock<store::MemoryStore> = OnceLock::new();
        Arc::new(SHARED.get_or_init(store::MemoryStore::new).clone())
    }
}
