//! Dashboard widget layout, persisted per browser.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::kv::{load_json, save_json, KeyValueStore};

const DASHBOARD_PREFS_KEY: &str = "projecthub.dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Stats,
    MyProjects,
    ReceivedResponses,
    SentResponses,
    QuickActions,
}

impl Widget {
    pub const ALL: [Widget; 5] = [
        Widget::Stats,
        Widget::QuickActions,
        Widget::MyProjects,
        Widget::ReceivedResponses,
        Widget::SentResponses,
    ];

    /// Stored name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Widget::Stats => "stats",
            Widget::MyProjects => "my_projects",
            Widget::ReceivedResponses => "received_responses",
            Widget::SentResponses => "sent_responses",
            Widget::QuickActions => "quick_actions",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Widget::Stats => "Overview",
            Widget::MyProjects => "My projects",
            Widget::ReceivedResponses => "Applications received",
            Widget::SentResponses => "My applications",
            Widget::QuickActions => "Quick actions",
        }
    }
}

/// Widget order and visibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPrefs")]
pub struct DashboardPrefs {
    pub order: Vec<Widget>,
    #[serde(default)]
    pub hidden: BTreeSet<Widget>,
}

impl Default for DashboardPrefs {
    fn default() -> Self {
        Self {
            order: Widget::ALL.to_vec(),
            hidden: BTreeSet::new(),
        }
    }
}

/// Saved shape with widget names kept as strings, so names written by another
/// build do not discard the rest of the layout.
#[derive(Deserialize)]
struct StoredPrefs {
    #[serde(default)]
    order: Vec<String>,
    #[serde(default)]
    hidden: Vec<String>,
}

impl From<StoredPrefs> for DashboardPrefs {
    fn from(stored: StoredPrefs) -> Self {
        Self {
            order: stored.order.iter().filter_map(|w| Widget::parse(w)).collect(),
            hidden: stored.hidden.iter().filter_map(|w| Widget::parse(w)).collect(),
        }
    }
}

impl DashboardPrefs {
    /// Load saved prefs, dropping unknown widgets and repairing duplicates and
    /// missing ones.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut prefs: Self = load_json(store, DASHBOARD_PREFS_KEY).unwrap_or_default();
        prefs.repair();
        prefs
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        save_json(store, DASHBOARD_PREFS_KEY, self);
    }

    fn repair(&mut self) {
        let mut seen = BTreeSet::new();
        self.order.retain(|w| seen.insert(*w));
        for widget in Widget::ALL {
            if !seen.contains(&widget) {
                self.order.push(widget);
            }
        }
    }

    /// Widgets to render, in order.
    pub fn visible(&self) -> Vec<Widget> {
        self.order
            .iter()
            .filter(|w| !self.hidden.contains(w))
            .copied()
            .collect()
    }

    pub fn is_hidden(&self, widget: Widget) -> bool {
        self.hidden.contains(&widget)
    }

    pub fn toggle(&mut self, widget: Widget) {
        if !self.hidden.remove(&widget) {
            self.hidden.insert(widget);
        }
    }

    pub fn move_up(&mut self, widget: Widget) {
        if let Some(i) = self.position(widget) {
            if i > 0 {
                self.order.swap(i, i - 1);
            }
        }
    }

    pub fn move_down(&mut self, widget: Widget) {
        if let Some(i) = self.position(widget) {
            if i + 1 < self.order.len() {
                self.order.swap(i, i + 1);
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn position(&self, widget: Widget) -> Option<usize> {
        self.order.iter().position(|w| *w == widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_toggle_and_reorder() {
        let mut prefs = DashboardPrefs::default();
        prefs.toggle(Widget::QuickActions);
        assert!(prefs.is_hidden(Widget::QuickActions));
        assert!(!prefs.visible().contains(&Widget::QuickActions));

        prefs.move_up(Widget::MyProjects);
        assert_eq!(prefs.order[1], Widget::MyProjects);
        prefs.move_up(Widget::Stats);
        assert_eq!(prefs.order[0], Widget::Stats);
        prefs.move_down(Widget::SentResponses);
        assert_eq!(prefs.order.last(), Some(&Widget::SentResponses));

        prefs.toggle(Widget::QuickActions);
        prefs.reset();
        assert_eq!(prefs, DashboardPrefs::default());
    }

    #[test]
    fn test_persistence_round_trip_and_repair() {
        let store = MemoryStore::new();
        let mut prefs = DashboardPrefs::default();
        prefs.move_down(Widget::Stats);
        prefs.toggle(Widget::SentResponses);
        prefs.save(&store);
        assert_eq!(DashboardPrefs::load(&store), prefs);

        store.set(
            DASHBOARD_PREFS_KEY,
            r#"{"order":["sent_responses","sent_responses","stats"]}"#,
        );
        let repaired = DashboardPrefs::load(&store);
        assert_eq!(repaired.order.len(), Widget::ALL.len());
        assert_eq!(repaired.order[0], Widget::SentResponses);
        assert_eq!(repaired.order[1], Widget::Stats);
    }

    #[test]
    fn test_unknown_widgets_are_dropped_on_load() {
        let store = MemoryStore::new();
        store.set(
            DASHBOARD_PREFS_KEY,
            r#"{"order":["sent_responses","stats","legacy_widget"],"hidden":["legacy_widget","my_projects"]}"#,
        );
        let prefs = DashboardPrefs::load(&store);
        assert_eq!(
            prefs.order,
            vec![
                Widget::SentResponses,
                Widget::Stats,
                Widget::QuickActions,
                Widget::MyProjects,
                Widget::ReceivedResponses,
            ]
        );
        assert_eq!(prefs.hidden, BTreeSet::from([Widget::MyProjects]));
    }

    #[test]
    fn test_widget_names_match_serde() {
        for widget in Widget::ALL {
            let json = serde_json::to_string(&widget).unwrap();
            assert_eq!(json, format!("\"{}\"", widget.as_str()));
            assert_eq!(Widget::parse(widget.as_str()), Some(widget));
        }
        assert_eq!(Widget::parse("legacy_widget"), None);
    }
}
