//! Autocomplete ranking for catalog pickers (tags, technologies).

use std::collections::BTreeSet;

use crate::models::{Id, Tag, Technology};

/// Anything that can be offered as a named suggestion.
pub trait Suggestion: Clone {
    fn id(&self) -> Id;
    fn name(&self) -> &str;
}

impl Suggestion for Tag {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Suggestion for Technology {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Rank `items` against `query`: exact, then prefix, then substring matches,
/// alphabetical within a rank. Ids in `exclude` are skipped.
pub fn rank_suggestions<T: Suggestion>(
    items: &[T],
    query: &str,
    exclude: &BTreeSet<Id>,
    limit: usize,
) -> Vec<T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(u8, String, &T)> = items
        .iter()
        .filter(|item| !exclude.contains(&item.id()))
        .filter_map(|item| {
            let name = item.name().to_lowercase();
            let rank = if name == query {
                0
            } else if name.starts_with(&query) {
                1
            } else if name.contains(&query) {
                2
            } else {
                return None;
            };
            Some((rank, name, item))
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, _, item)| item.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Tag {
                id: i as Id + 1,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_exact_prefix_substring_order() {
        let items = tags(&["TypeScript", "Rust", "rust-analyzer", "Trust & Safety", "Go"]);
        let names: Vec<String> = rank_suggestions(&items, "rust", &BTreeSet::new(), 10)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Rust", "rust-analyzer", "Trust & Safety"]);
    }

    #[test]
    fn test_excludes_selected_and_limits() {
        let items = tags(&["Rust", "rust-analyzer", "Trust & Safety"]);
        let exclude = BTreeSet::from([1]);
        let names: Vec<String> = rank_suggestions(&items, "RUST", &exclude, 1)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["rust-analyzer"]);
    }

    #[test]
    fn test_blank_query_suggests_nothing() {
        let items = tags(&["Rust"]);
        assert!(rank_suggestions(&items, "   ", &BTreeSet::new(), 5).is_empty());
    }
}
