use bytes::Bytes;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Difficulty, Problem, RemoteMeta, SimilarQuestion};

/// Default public problem-database API.
pub const DEFAULT_API_BASE: &str = "https://leetcode-api-pied.vercel.app";

/// Maximum number of results the remote search returns to callers.
pub const MAX_SEARCH_RESULTS: usize = 20;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    Status(StatusCode),
}

/// One search hit from the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub frontend_id: String,
    pub title: String,
    pub title_slug: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailTopicTag {
    pub name: String,
}

/// Full problem metadata as delivered by the remote API. `stats` and
/// `similar_questions` arrive as JSON-encoded strings; use the parse
/// helpers to decode them. The upstream mixes snake_case and camelCase
/// field names, hence the per-field renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetail {
    pub id: String,
    #[serde(default)]
    pub frontend_id: String,
    pub title: String,
    pub title_slug: String,
    #[serde(default)]
    pub url: String,
    /// Problem statement as HTML.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub dislikes: i64,
    #[serde(default)]
    pub stats: String,
    #[serde(default, rename = "similarQuestions")]
    pub similar_questions: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default, rename = "topicTags")]
    pub topic_tags: Vec<DetailTopicTag>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default, rename = "isPaidOnly")]
    pub is_paid_only: bool,
    #[serde(default, rename = "categoryTitle")]
    pub category_title: String,
}

impl ProblemDetail {
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty.parse().unwrap_or(Difficulty::Medium)
    }

    /// Decode the `similarQuestions` JSON string. An unparseable payload
    /// yields an empty list.
    pub fn parse_similar_questions(&self) -> Vec<SimilarQuestion> {
        serde_json::from_str(&self.similar_questions).unwrap_or_default()
    }

    pub fn remote_meta(&self) -> RemoteMeta {
        RemoteMeta {
            content_html: self.content.clone(),
            likes: self.likes,
            dislikes: self.dislikes,
            stats: self.stats.clone(),
            hints: self.hints.clone(),
            similar_questions: self.parse_similar_questions(),
            category_title: if self.category_title.is_empty() {
                None
            } else {
                Some(self.category_title.clone())
            },
        }
    }

    /// Build a new tracked record from this metadata (used by imports).
    pub fn into_record(self) -> Problem {
        let mut p = Problem::new(self.title.clone(), self.difficulty());
        p.number = Some(if self.frontend_id.is_empty() {
            self.id.clone()
        } else {
            self.frontend_id.clone()
        });
        p.url = if self.url.is_empty() {
            format!("https://leetcode.com/problems/{}/", self.title_slug)
        } else {
            self.url.clone()
        };
        for tag in &self.topic_tags {
            p.add_tag(&tag.name);
        }
        p.remote = Some(self.remote_meta());
        p
    }
}

/// Raw upstream response relayed by the proxy.
#[derive(Debug)]
pub struct Upstream {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Client for the remote problem database. Thin: no retries, no caching.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Search the remote database. Best effort: any failure is logged and
    /// reported as "no results".
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let path = format!("/search?query={}", urlencode(query));
        match self.get_json::<Vec<SearchResult>>(&path).await {
            Ok(mut results) => {
                results.truncate(MAX_SEARCH_RESULTS);
                results
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "remote search failed");
                Vec::new()
            }
        }
    }

    /// Fetch full metadata by numeric id or slug. `None` on not-found or
    /// any other failure.
    pub async fn problem(&self, id_or_slug: &str) -> Option<ProblemDetail> {
        let path = format!("/problem/{}", urlencode(id_or_slug));
        match self.get_json(&path).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                tracing::warn!(identifier = id_or_slug, error = %e, "problem lookup failed");
                None
            }
        }
    }

    /// Today's daily challenge.
    pub async fn daily(&self) -> Option<ProblemDetail> {
        match self.get_json("/daily").await {
            Ok(detail) => Some(detail),
            Err(e) => {
                tracing::warn!(error = %e, "daily challenge lookup failed");
                None
            }
        }
    }

    /// A random problem.
    pub async fn random(&self) -> Option<ProblemDetail> {
        match self.get_json("/random").await {
            Ok(detail) => Some(detail),
            Err(e) => {
                tracing::warn!(error = %e, "random problem lookup failed");
                None
            }
        }
    }

    /// Forward a request and hand back whatever the upstream sent, without
    /// interpreting the body. Used by the proxy endpoints.
    pub async fn forward(&self, path_and_query: &str) -> Result<Upstream, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(Upstream { status, body })
    }
}

/// Reduce upstream problem-statement HTML to plain text: tags removed,
/// common entities decoded. Good enough for a terminal description field.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    let out = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    // Collapse the blank-line runs left behind by block elements.
    let mut result = String::with_capacity(out.len());
    let mut blank_run = 0;
    for line in out.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result.trim().to_string()
}

/// Percent-encode a query-string or path component.
pub fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_flattens_markup() {
        let html = "<p>Given an array of integers <code>nums</code>&nbsp;and an integer \
                    <code>target</code>.</p>\n\n\n<p>Return indices.</p>";
        let text = strip_html(html);
        assert!(text.contains("Given an array of integers nums and an integer target."));
        assert!(!text.contains('<'));
        assert!(!text.contains("&nbsp;"));
    }

    #[test]
    fn urlencode_escapes_reserved_characters() {
        assert_eq!(urlencode("two sum"), "two%20sum");
        assert_eq!(urlencode("a/b?c=d"), "a%2Fb%3Fc%3Dd");
        assert_eq!(urlencode("two-sum_2.0~x"), "two-sum_2.0~x");
    }

    #[test]
    fn detail_parses_similar_questions_leniently() {
        let mut detail: ProblemDetail = serde_json::from_value(serde_json::json!({
            "id": "1",
            "frontend_id": "1",
            "title": "Two Sum",
            "title_slug": "two-sum",
            "difficulty": "Easy",
        }))
        .unwrap();

        detail.similar_questions =
            r#"[{"title":"3Sum","titleSlug":"3sum","difficulty":"Medium"}]"#.to_string();
        assert_eq!(detail.parse_similar_questions().len(), 1);

        detail.similar_questions = "not json".to_string();
        assert!(detail.parse_similar_questions().is_empty());
    }

    #[test]
    fn detail_converts_into_record() {
        let detail: ProblemDetail = serde_json::from_value(serde_json::json!({
            "id": "1",
            "frontend_id": "1",
            "title": "Two Sum",
            "title_slug": "two-sum",
            "difficulty": "Easy",
            "likes": 100,
            "dislikes": 3,
            "hints": ["think hash map"],
            "topicTags": [{"name": "Array"}, {"name": "Array"}],
            "categoryTitle": "Algorithms",
        }))
        .unwrap();

        let record = detail.into_record();
        assert_eq!(record.title, "Two Sum");
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert_eq!(record.number.as_deref(), Some("1"));
        assert_eq!(record.url, "https://leetcode.com/problems/two-sum/");
        assert_eq!(record.tags, vec!["Array"]);
        let meta = record.remote.unwrap();
        assert_eq!(meta.likes, 100);
        assert_eq!(meta.hints.len(), 1);
        assert_eq!(meta.category_title.as_deref(), Some("Algorithms"));
    }

    #[test]
    fn unknown_difficulty_defaults_to_medium() {
        let detail: ProblemDetail = serde_json::from_value(serde_json::json!({
            "id": "9",
            "title": "Mystery",
            "title_slug": "mystery",
            "difficulty": "Unrated",
        }))
        .unwrap();
        assert_eq!(detail.difficulty(), Difficulty::Medium);
    }
}
