use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;

use crate::catalog::{Catalog, CatalogEntry};
use crate::remote::{ProblemDetail, RemoteClient, SearchResult};

/// One autocomplete suggestion, normalized from either the local catalog
/// or the remote search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub number: String,
    pub title: String,
    pub title_slug: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub url: String,
}

impl From<&CatalogEntry> for Suggestion {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            number: entry.frontend_question_id.clone(),
            title: entry.title.clone(),
            title_slug: entry.title_slug.clone(),
            difficulty: entry.difficulty.clone(),
            tags: entry.tag_names(),
            url: entry.url(),
        }
    }
}

impl From<SearchResult> for Suggestion {
    fn from(result: SearchResult) -> Self {
        let url = if result.url.is_empty() {
            format!("https://leetcode.com/problems/{}/", result.title_slug)
        } else {
            result.url
        };
        Self {
            number: result.frontend_id,
            title: result.title,
            title_slug: result.title_slug,
            // Remote search hits carry no difficulty or tags.
            difficulty: String::new(),
            tags: Vec::new(),
            url,
        }
    }
}

enum Request {
    Search { seq: u64, query: String },
    Fetch { seq: u64, identifier: String },
}

enum Response {
    Suggestions { seq: u64, hits: Vec<Suggestion> },
    Detail { seq: u64, detail: Option<Box<ProblemDetail>> },
}

/// An event that survived the staleness guard.
#[derive(Debug)]
pub enum LookupEvent {
    Suggestions(Vec<Suggestion>),
    Detail(Option<Box<ProblemDetail>>),
}

/// Handle to the background lookup worker.
///
/// Requests are stamped with a monotonically increasing sequence number.
/// [`LookupHandle::poll`] drops any response that does not match the latest
/// issued request of its kind, so a slow response to an earlier keystroke
/// can never overwrite a newer one: the latest request wins.
pub struct LookupHandle {
    req_tx: Sender<Request>,
    resp_rx: Receiver<Response>,
    next_seq: u64,
    latest_search: u64,
    latest_fetch: u64,
}

impl LookupHandle {
    /// Start the worker thread. The catalog is owned by the caller and
    /// shared in; the worker consults it first and only falls back to the
    /// remote API when the catalog has nothing to offer.
    pub fn spawn(catalog: Arc<Catalog>, client: RemoteClient) -> Self {
        let (req_tx, req_rx) = channel::<Request>();
        let (resp_tx, resp_rx) = channel::<Response>();

        thread::spawn(move || worker_loop(req_rx, resp_tx, catalog, client));

        Self {
            req_tx,
            resp_rx,
            next_seq: 0,
            latest_search: 0,
            latest_fetch: 0,
        }
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Issue an autocomplete search. Supersedes any search still in flight.
    pub fn search(&mut self, query: &str) {
        let seq = self.bump();
        self.latest_search = seq;
        // A send failure means the worker is gone; the TUI degrades to
        // no suggestions, matching the "no results" failure policy.
        let _ = self.req_tx.send(Request::Search {
            seq,
            query: query.to_string(),
        });
    }

    /// Issue a detail fetch. Supersedes any fetch still in flight.
    pub fn fetch(&mut self, identifier: &str) {
        let seq = self.bump();
        self.latest_fetch = seq;
        let _ = self.req_tx.send(Request::Fetch {
            seq,
            identifier: identifier.to_string(),
        });
    }

    /// Drain the response channel, returning the first event that is still
    /// current. Stale responses are silently dropped.
    pub fn poll(&mut self) -> Option<LookupEvent> {
        loop {
            match self.resp_rx.try_recv() {
                Ok(Response::Suggestions { seq, hits }) => {
                    if seq == self.latest_search {
                        return Some(LookupEvent::Suggestions(hits));
                    }
                    // Stale: a newer search was issued after this one.
                }
                Ok(Response::Detail { seq, detail }) => {
                    if seq == self.latest_fetch {
                        self.latest_fetch = 0;
                        return Some(LookupEvent::Detail(detail));
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

fn worker_loop(
    req_rx: Receiver<Request>,
    resp_tx: Sender<Response>,
    catalog: Arc<Catalog>,
    client: RemoteClient,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "lookup worker failed to start");
            return;
        }
    };

    while let Ok(request) = req_rx.recv() {
        let response = match request {
            Request::Search { seq, query } => {
                let hits = if catalog.is_empty() {
                    let query = query.trim();
                    if query.is_empty() {
                        Vec::new()
                    } else {
                        runtime
                            .block_on(client.search(query))
                            .into_iter()
                            .map(Suggestion::from)
                            .collect()
                    }
                } else {
                    catalog.search(&query).into_iter().map(Suggestion::from).collect()
                };
                Response::Suggestions { seq, hits }
            }
            Request::Fetch { seq, identifier } => Response::Detail {
                seq,
                detail: runtime.block_on(client.problem(&identifier)).map(Box::new),
            },
        };

        if resp_tx.send(response).is_err() {
            // Handle dropped; nobody is listening anymore.
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TopicTag;
    use std::time::{Duration, Instant};

    fn test_catalog() -> Arc<Catalog> {
        let entry = |id: &str, title: &str, slug: &str| CatalogEntry {
            frontend_question_id: id.to_string(),
            title: title.to_string(),
            title_slug: slug.to_string(),
            difficulty: "Easy".to_string(),
            topic_tags: vec![TopicTag {
                name: "Array".to_string(),
            }],
            paid_only: false,
        };
        Arc::new(Catalog::new(vec![
            entry("1", "Two Sum", "two-sum"),
            entry("146", "LRU Cache", "lru-cache"),
        ]))
    }

    fn poll_until(handle: &mut LookupHandle, deadline: Duration) -> Option<LookupEvent> {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if let Some(event) = handle.poll() {
                return Some(event);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn catalog_search_answers_through_worker() {
        let client = RemoteClient::new("http://127.0.0.1:1"); // never contacted
        let mut handle = LookupHandle::spawn(test_catalog(), client);

        handle.search("two");
        match poll_until(&mut handle, Duration::from_secs(5)) {
            Some(LookupEvent::Suggestions(hits)) => {
                assert_eq!(hits.len(), 1);
                assert_eq!(hits[0].title, "Two Sum");
                assert_eq!(hits[0].url, "https://leetcode.com/problems/two-sum/");
            }
            other => panic!("expected suggestions, got {:?}", other),
        }
    }

    #[test]
    fn stale_search_responses_are_dropped() {
        let client = RemoteClient::new("http://127.0.0.1:1");
        let mut handle = LookupHandle::spawn(test_catalog(), client);

        // Two searches in quick succession. The worker answers both in
        // order, but only the response to the second may be surfaced.
        handle.search("two");
        handle.search("lru");

        let mut seen = Vec::new();
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(5) {
            if let Some(LookupEvent::Suggestions(hits)) = handle.poll() {
                seen.push(hits);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(seen.len(), 1, "exactly one response should survive");
        assert_eq!(seen[0][0].title, "LRU Cache");
        // Nothing further arrives: the "two" response was dropped.
        assert!(handle.poll().is_none());
    }

    #[test]
    fn suggestion_from_remote_result_builds_url() {
        let suggestion: Suggestion = SearchResult {
            id: "1".to_string(),
            frontend_id: "1".to_string(),
            title: "Two Sum".to_string(),
            title_slug: "two-sum".to_string(),
            url: String::new(),
        }
        .into();
        assert_eq!(suggestion.url, "https://leetcode.com/problems/two-sum/");
        assert!(suggestion.difficulty.is_empty());
    }
}
