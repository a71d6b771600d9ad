//! Persisted dashboard layout.

use dioxus::prelude::*;
use store::DashboardPrefs;

use crate::storage::make_store;

pub fn use_dashboard() -> Signal<DashboardPrefs> {
    use_context::<Signal<DashboardPrefs>>()
}

/// Loads widget preferences once and writes them back whenever they change.
#[component]
pub fn DashboardProvider(children: Element) -> Element {
    let prefs = use_signal(|| DashboardPrefs::load(make_store().as_ref()));

    use_effect(move || {
        let current = prefs.read();
        current.save(make_store().as_ref());
        tracing::debug!(visible = current.visible().len(), "Saved dashboard layout");
    });

    use_context_provider(|| prefs);

    rsx! {
        {children}
    }
}
