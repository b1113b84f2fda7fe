use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Problem difficulty. Exactly three values; anything else is a data error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// All values in display order, used by the form's cycle field and the filter modal.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Easy" | "easy" => Ok(Difficulty::Easy),
            "Medium" | "medium" => Ok(Difficulty::Medium),
            "Hard" | "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// A similar question referenced by the remote problem database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarQuestion {
    pub title: String,
    pub title_slug: String,
    pub difficulty: String,
}

/// Cached metadata from the remote problem database. Entirely optional:
/// records created by hand never have it, records enriched or imported do.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMeta {
    #[serde(default)]
    pub content_html: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub dislikes: i64,
    /// Acceptance statistics, kept as the raw JSON string the upstream delivers.
    #[serde(default)]
    pub stats: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub similar_questions: Vec<SimilarQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_title: Option<String>,
}

/// One tracked interview problem. Serialized camelCase so the persisted file
/// stays compatible with earlier exports of the same data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub code: String,
    pub date_added: DateTime<Utc>,
    pub date_edited: DateTime<Utc>,
    /// Persisted text-area heights (terminal rows) for the edit form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_height: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_height: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteMeta>,
}

impl Problem {
    pub fn new(title: String, difficulty: Difficulty) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            number: None,
            title,
            difficulty,
            url: String::new(),
            tags: Vec::new(),
            description: String::new(),
            notes: None,
            code: String::new(),
            date_added: now,
            date_edited: now,
            description_height: None,
            notes_height: None,
            remote: None,
        }
    }

    /// Refresh the edited timestamp. Keeps `date_edited >= date_added` even
    /// if the clock stepped backwards between creation and save.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.date_edited = if now < self.date_added {
            self.date_added
        } else {
            now
        };
    }

    /// Append a tag unless it is already present. Order is preserved,
    /// first occurrence wins.
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Replace the tag list from a comma-separated string, deduplicating.
    pub fn set_tags_from_str(&mut self, tags: &str) {
        self.tags.clear();
        for tag in tags.split(',') {
            self.add_tag(tag);
        }
    }
}

/// Insert or replace a problem in the collection by id.
pub fn upsert_problem(problems: &mut Vec<Problem>, problem: Problem) {
    if let Some(existing) = problems.iter_mut().find(|p| p.id == problem.id) {
        *existing = problem;
    } else {
        problems.push(problem);
    }
}

/// Remove a problem by id. Returns true if something was removed;
/// a nonexistent id is a no-op.
pub fn remove_problem(problems: &mut Vec<Problem>, id: &str) -> bool {
    let before = problems.len();
    problems.retain(|p| p.id != id);
    problems.len() != before
}

/// Starter records used to seed an empty store on first run.
pub fn sample_problems() -> Vec<Problem> {
    let mut two_sum = Problem::new("Two Sum".to_string(), Difficulty::Easy);
    two_sum.number = Some("1".to_string());
    two_sum.url = "https://leetcode.com/problems/two-sum/".to_string();
    two_sum.tags = vec!["Array".to_string(), "Hash Table".to_string()];
    two_sum.description = "Given an array of integers nums and an integer target, \
        return indices of the two numbers such that they add up to target."
        .to_string();
    two_sum.notes = Some("Use a hash map to store the complement of the current number.".to_string());
    two_sum.code = "class Solution:\n    def twoSum(self, nums: List[int], target: int) -> List[int]:\n        prevMap = {}\n        for i, n in enumerate(nums):\n            diff = target - n\n            if diff in prevMap:\n                return [prevMap[diff], i]\n            prevMap[n] = i\n".to_string();

    let mut lru = Problem::new("LRU Cache".to_string(), Difficulty::Medium);
    lru.number = Some("146".to_string());
    lru.url = "https://leetcode.com/problems/lru-cache/".to_string();
    lru.tags = vec![
        "Design".to_string(),
        "Hash Table".to_string(),
        "Linked List".to_string(),
    ];
    lru.description =
        "Design a data structure that follows the constraints of a Least Recently Used (LRU) cache."
            .to_string();
    lru.notes =
        Some("Double linked list + hash map is the standard way to achieve O(1) operations.".to_string());

    let mut merge_k = Problem::new("Merge k Sorted Lists".to_string(), Difficulty::Hard);
    merge_k.number = Some("23".to_string());
    merge_k.url = "https://leetcode.com/problems/merge-k-sorted-lists/".to_string();
    merge_k.tags = vec![
        "Linked List".to_string(),
        "Divide and Conquer".to_string(),
        "Heap".to_string(),
    ];
    merge_k.description = "You are given an array of k linked-lists lists, each linked-list \
        is sorted in ascending order.\n\nMerge all the linked-lists into one sorted linked-list \
        and return it."
        .to_string();
    merge_k.notes = Some("Min-heap is efficient here. Time complexity O(N log k).".to_string());

    vec![two_sum, lru, merge_k]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_serde() {
        for d in Difficulty::ALL {
            let json = serde_json::to_string(&d).unwrap();
            let back: Difficulty = serde_json::from_str(&json).unwrap();
            assert_eq!(d, back);
        }
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"Easy\"");
    }

    #[test]
    fn difficulty_rejects_unknown_values() {
        assert!(serde_json::from_str::<Difficulty>("\"Extreme\"").is_err());
        assert!("Extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn touch_keeps_edited_at_or_after_added() {
        let mut p = Problem::new("Two Sum".to_string(), Difficulty::Easy);
        p.touch();
        assert!(p.date_edited >= p.date_added);

        // Even with a future date_added the invariant holds.
        p.date_added = Utc::now() + chrono::Duration::hours(1);
        p.touch();
        assert!(p.date_edited >= p.date_added);
    }

    #[test]
    fn add_tag_deduplicates_and_preserves_order() {
        let mut p = Problem::new("x".to_string(), Difficulty::Easy);
        p.add_tag("Array");
        p.add_tag("Hash Table");
        p.add_tag("Array");
        p.add_tag("  ");
        assert_eq!(p.tags, vec!["Array", "Hash Table"]);

        p.set_tags_from_str("DP, Math,DP, ,Greedy");
        assert_eq!(p.tags, vec!["DP", "Math", "Greedy"]);
    }

    #[test]
    fn remove_problem_removes_exactly_one() {
        let mut problems = sample_problems();
        let victim = problems[1].id.clone();
        let survivors: Vec<String> = problems
            .iter()
            .filter(|p| p.id != victim)
            .map(|p| p.id.clone())
            .collect();

        assert!(remove_problem(&mut problems, &victim));
        assert_eq!(
            problems.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            survivors
        );

        // Deleting a nonexistent id is a no-op.
        assert!(!remove_problem(&mut problems, "no-such-id"));
        assert_eq!(problems.len(), survivors.len());
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut problems = sample_problems();
        let mut edited = problems[0].clone();
        edited.title = "Two Sum (revisited)".to_string();
        upsert_problem(&mut problems, edited);
        assert_eq!(problems.len(), 3);
        assert_eq!(problems[0].title, "Two Sum (revisited)");

        let fresh = Problem::new("New".to_string(), Difficulty::Medium);
        upsert_problem(&mut problems, fresh);
        assert_eq!(problems.len(), 4);
    }

    #[test]
    fn problem_serializes_camel_case() {
        let p = Problem::new("Two Sum".to_string(), Difficulty::Easy);
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("dateAdded").is_some());
        assert!(value.get("dateEdited").is_some());
        // Unset optionals are omitted entirely.
        assert!(value.get("number").is_none());
        assert!(value.get("remote").is_none());
    }
}
