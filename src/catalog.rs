use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Maximum number of hits a catalog search returns.
pub const MAX_RESULTS: usize = 10;

/// One lightweight problem summary from the catalog snapshot. The snapshot
/// file uses the upstream problem-list field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub frontend_question_id: String,
    pub title: String,
    pub title_slug: String,
    pub difficulty: String,
    #[serde(default)]
    pub topic_tags: Vec<TopicTag>,
    #[serde(default)]
    pub paid_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicTag {
    pub name: String,
}

impl CatalogEntry {
    pub fn tag_names(&self) -> Vec<String> {
        self.topic_tags.iter().map(|t| t.name.clone()).collect()
    }

    /// Canonical URL for this problem on the upstream site.
    pub fn url(&self) -> String {
        format!("https://leetcode.com/problems/{}/", self.title_slug)
    }
}

/// The offline autocomplete catalog. Loaded once at startup and passed to
/// consumers by the caller; there is no global cache.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Read the snapshot file. A missing or corrupt snapshot degrades to an
    /// empty catalog — autocomplete simply has nothing local to offer.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "catalog snapshot unavailable");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => Self { entries },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "catalog snapshot unreadable");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Best-effort autocomplete: case-insensitive substring match on the
    /// title, or substring match on the question number. Empty and
    /// whitespace-only queries return nothing. At most [`MAX_RESULTS`]
    /// hits, in catalog order.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let lower = query.to_lowercase();

        self.entries
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&lower) || e.frontend_question_id.contains(query)
            })
            .take(MAX_RESULTS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, slug: &str, difficulty: &str) -> CatalogEntry {
        CatalogEntry {
            frontend_question_id: id.to_string(),
            title: title.to_string(),
            title_slug: slug.to_string(),
            difficulty: difficulty.to_string(),
            topic_tags: vec![TopicTag {
                name: "Array".to_string(),
            }],
            paid_only: false,
        }
    }

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            entry("1", "Two Sum", "two-sum", "Easy"),
            entry("15", "3Sum", "3sum", "Medium"),
            entry("146", "LRU Cache", "lru-cache", "Medium"),
            entry("167", "Two Sum II - Input Array Is Sorted", "two-sum-ii", "Medium"),
        ])
    }

    #[test]
    fn empty_or_whitespace_query_returns_nothing() {
        let catalog = test_catalog();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("\t").is_empty());
    }

    #[test]
    fn title_match_is_case_insensitive() {
        let catalog = test_catalog();
        let hits = catalog.search("two sum");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].frontend_question_id, "1");
        assert_eq!(hits[1].frontend_question_id, "167");
    }

    #[test]
    fn number_substring_matches() {
        let catalog = test_catalog();
        let hits = catalog.search("14");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "LRU Cache");

        // "1" is a substring of "1", "15", "146" and "167".
        assert_eq!(catalog.search("1").len(), 4);
    }

    #[test]
    fn results_are_capped() {
        let entries: Vec<CatalogEntry> = (0..50)
            .map(|i| entry(&i.to_string(), &format!("Problem {i}"), "slug", "Easy"))
            .collect();
        let catalog = Catalog::new(entries);
        assert_eq!(catalog.search("Problem").len(), MAX_RESULTS);
    }

    #[test]
    fn missing_snapshot_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(&dir.path().join("nope.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn snapshot_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.json");
        fs::write(
            &path,
            r#"[{"frontendQuestionId":"1","title":"Two Sum","titleSlug":"two-sum",
                "difficulty":"Easy","topicTags":[{"name":"Array"},{"name":"Hash Table"}],
                "paidOnly":false}]"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path);
        assert_eq!(catalog.len(), 1);
        let hits = catalog.search("two");
        assert_eq!(hits[0].tag_names(), vec!["Array", "Hash Table"]);
        assert_eq!(hits[0].url(), "https://leetcode.com/problems/two-sum/");
    }
}
