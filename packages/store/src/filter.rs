//! # Client-side project filtering
//!
//! The browse page fetches the project list once and narrows it locally with a
//! [`ProjectFilter`]. Criteria combine with AND:
//!
//! | Criterion | Rule |
//! |-----------|------|
//! | `search` | every whitespace-separated term must appear (case-insensitive) in the title, short description or a tag name |
//! | `tags` | the project carries **all** selected tags |
//! | `technologies` | the project uses **at least one** selected technology |
//! | `status` | exact match |
//! | `only_open` | at least one open vacancy |
//!
//! The filter round-trips through a URL query string (`to_query`/`from_query`) so
//! a filtered view can be bookmarked.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use url::form_urlencoded;

use crate::models::{Id, Project, ProjectStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectSort {
    #[default]
    Newest,
    Oldest,
    Title,
    MostVacancies,
}

impl ProjectSort {
    pub const ALL: [ProjectSort; 4] = [
        ProjectSort::Newest,
        ProjectSort::Oldest,
        ProjectSort::Title,
        ProjectSort::MostVacancies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectSort::Newest => "newest",
            ProjectSort::Oldest => "oldest",
            ProjectSort::Title => "title",
            ProjectSort::MostVacancies => "vacancies",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectSort::Newest => "Newest first",
            ProjectSort::Oldest => "Oldest first",
            ProjectSort::Title => "Title A-Z",
            ProjectSort::MostVacancies => "Most open roles",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == s)
    }

    fn compare(&self, a: &Project, b: &Project) -> Ordering {
        let primary = match self {
            ProjectSort::Newest => b.created_at.cmp(&a.created_at),
            ProjectSort::Oldest => a.created_at.cmp(&b.created_at),
            ProjectSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            ProjectSort::MostVacancies => b.open_vacancies.cmp(&a.open_vacancies),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

/// Multi-criteria filter over a project list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectFilter {
    pub search: String,
    pub tags: BTreeSet<Id>,
    pub technologies: BTreeSet<Id>,
    pub status: Option<ProjectStatus>,
    pub only_open: bool,
    pub sort: ProjectSort,
}

impl ProjectFilter {
    /// True when no criterion narrows the list (sort order is ignored).
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.tags.is_empty()
            && self.technologies.is_empty()
            && self.status.is_none()
            && !self.only_open
    }

    /// Reset every criterion but keep the sort order.
    pub fn clear(&mut self) {
        *self = Self {
            sort: self.sort,
            ..Self::default()
        };
    }

    pub fn toggle_tag(&mut self, id: Id) {
        if !self.tags.remove(&id) {
            self.tags.insert(id);
        }
    }

    pub fn toggle_technology(&mut self, id: Id) {
        if !self.technologies.remove(&id) {
            self.technologies.insert(id);
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if self.only_open && project.open_vacancies == 0 {
            return false;
        }
        if !self.tags.iter().all(|id| project.has_tag(*id)) {
            return false;
        }
        if !self.technologies.is_empty()
            && !self.technologies.iter().any(|id| project.uses_technology(*id))
        {
            return false;
        }
        self.matches_search(project)
    }

    fn matches_search(&self, project: &Project) -> bool {
        let terms: Vec<String> = self
            .search
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if terms.is_empty() {
            return true;
        }
        let haystack = {
            let mut text = format!(
                "{} {}",
                project.title.to_lowercase(),
                project.short_description.to_lowercase()
            );
            for tag in &project.tags {
                text.push(' ');
                text.push_str(&tag.name.to_lowercase());
            }
            text
        };
        terms.iter().all(|term| haystack.contains(term.as_str()))
    }

    /// Filter then sort.
    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        let mut result: Vec<Project> = projects
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }

    /// Encode as a URL query string (without the leading `?`).
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let search = self.search.trim();
        if !search.is_empty() {
            query.append_pair("q", search);
        }
        if !self.tags.is_empty() {
            query.append_pair("tags", &join_ids(&self.tags));
        }
        if !self.technologies.is_empty() {
            query.append_pair("tech", &join_ids(&self.technologies));
        }
        if let Some(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        if self.only_open {
            query.append_pair("open", "1");
        }
        if self.sort != ProjectSort::default() {
            query.append_pair("sort", self.sort.as_str());
        }
        query.finish()
    }

    /// Decode from a URL query string. Unknown or malformed parts are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut filter = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "q" => filter.search = value.into_owned(),
                "tags" => filter.tags = parse_ids(&value),
                "tech" => filter.technologies = parse_ids(&value),
                "status" => filter.status = ProjectStatus::parse(&value),
                "open" => filter.only_open = value == "1" || value == "true",
                "sort" => filter.sort = ProjectSort::parse(&value).unwrap_or_default(),
                _ => {}
            }
        }
        filter
    }
}

fn join_ids(ids: &BTreeSet<Id>) -> String {
    ids.iter().map(Id::to_string).collect::<Vec<_>>().join(",")
}

fn parse_ids(value: &str) -> BTreeSet<Id> {
    value.split(',').filter_map(|s| s.trim().parse().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Tag, Technology, UserSummary};
    use chrono::{TimeZone, Utc};

    fn project(id: Id, title: &str, tags: &[(Id, &str)], tech: &[Id], open: u32, day: u32) -> Project {
        let created = Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
        Project {
            id,
            title: title.to_string(),
            short_description: format!("{title} short"),
            description: String::new(),
            status: ProjectStatus::Active,
            owner: UserSummary {
                id: 1,
                username: "owner".into(),
                avatar_url: None,
            },
            tags: tags
                .iter()
                .map(|(id, name)| Tag {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
            technologies: tech
                .iter()
                .map(|id| Technology {
                    id: *id,
                    name: format!("tech-{id}"),
                    category: None,
                })
                .collect(),
            open_vacancies: open,
            repository_url: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project(1, "Rust Compiler Playground", &[(10, "education"), (11, "tooling")], &[100], 2, 1),
            project(2, "Garden Planner", &[(12, "hobby")], &[101, 102], 0, 5),
            project(3, "Compiler Course Notes", &[(10, "education")], &[101], 1, 3),
        ]
    }

    #[test]
    fn test_empty_filter_sorts_newest_first() {
        let filter = ProjectFilter::default();
        assert!(filter.is_empty());
        let ids: Vec<Id> = filter.apply(&sample()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_search_requires_every_term() {
        let filter = ProjectFilter {
            search: "  compiler EDUCATION ".into(),
            ..Default::default()
        };
        let ids: Vec<Id> = filter.apply(&sample()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let filter = ProjectFilter {
            search: "compiler hobby".into(),
            ..Default::default()
        };
        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn test_tags_all_and_technologies_any() {
        let mut filter = ProjectFilter::default();
        filter.toggle_tag(10);
        filter.toggle_tag(11);
        let ids: Vec<Id> = filter.apply(&sample()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);

        let mut filter = ProjectFilter::default();
        filter.toggle_technology(100);
        filter.toggle_technology(102);
        let ids: Vec<Id> = filter.apply(&sample()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);

        filter.toggle_technology(102);
        assert_eq!(filter.technologies.len(), 1);
    }

    #[test]
    fn test_only_open_status_and_sort() {
        let mut projects = sample();
        projects[0].status = ProjectStatus::Completed;

        let filter = ProjectFilter {
            only_open: true,
            status: Some(ProjectStatus::Active),
            sort: ProjectSort::MostVacancies,
            ..Default::default()
        };
        let ids: Vec<Id> = filter.apply(&projects).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);

        let filter = ProjectFilter {
            sort: ProjectSort::Title,
            ..Default::default()
        };
        let titles: Vec<String> = filter.apply(&projects).into_iter().map(|p| p.title).collect();
        assert_eq!(
            titles,
            vec!["Compiler Course Notes", "Garden Planner", "Rust Compiler Playground"]
        );
    }

    #[test]
    fn test_clear_keeps_sort() {
        let mut filter = ProjectFilter {
            search: "x".into(),
            only_open: true,
            sort: ProjectSort::Oldest,
            ..Default::default()
        };
        filter.toggle_tag(1);
        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.sort, ProjectSort::Oldest);
    }

    #[test]
    fn test_sort_labels_and_parse() {
        assert_eq!(ProjectSort::Title.label(), "Title A-Z");
        for sort in ProjectSort::ALL {
            assert!(sort.label().is_ascii());
            assert_eq!(ProjectSort::parse(sort.as_str()), Some(sort));
        }
    }

    #[test]
    fn test_query_string_round_trip() {
        let mut filter = ProjectFilter {
            search: "c++ & rust".into(),
            status: Some(ProjectStatus::Draft),
            only_open: true,
            sort: ProjectSort::Title,
            ..Default::default()
        };
        filter.toggle_tag(3);
        filter.toggle_tag(1);
        filter.toggle_technology(9);

        let query = filter.to_query();
        assert_eq!(
            query,
            "q=c%2B%2B+%26+rust&tags=1%2C3&tech=9&status=draft&open=1&sort=title"
        );
        assert_eq!(ProjectFilter::from_query(&format!("?{query}")), filter);
    }

    #[test]
    fn test_query_string_non_ascii_search() {
        let filter = ProjectFilter {
            search: "café 100%".into(),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(query, "q=caf%C3%A9+100%25");
        assert_eq!(ProjectFilter::from_query(&query).search, "café 100%");
        // Hand-typed URLs may leave the id separator unescaped
        assert_eq!(
            ProjectFilter::from_query("tags=4,2").tags,
            BTreeSet::from([2, 4])
        );
    }

    #[test]
    fn test_from_query_ignores_garbage() {
        let filter = ProjectFilter::from_query("tags=1,x,2&status=nope&sort=weird&zzz&q=%ZZ");
        assert_eq!(filter.tags, BTreeSet::from([1, 2]));
        assert!(filter.status.is_none());
        assert_eq!(filter.sort, ProjectSort::Newest);
        assert_eq!(filter.search, "%ZZ");
        assert_eq!(ProjectFilter::default().to_query(), "");
    }
}
