use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use crate::models::Problem;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create data directory: {0}")]
    DirectoryError(String),
    #[error("Failed to write data file: {0}")]
    WriteError(String),
    #[error("Failed to serialize records: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Capability interface for record persistence. One backend is selected
/// from configuration at startup and handed to the rest of the program;
/// call sites never probe the environment.
pub trait ProblemStore: Send {
    /// Load the full collection. A missing or unreadable/corrupt backing
    /// store is treated as "no data" and yields an empty collection —
    /// loading never fails the caller.
    fn load(&self) -> Vec<Problem>;

    /// Persist the full collection, replacing whatever was stored before.
    /// Synchronous: when this returns Ok the data has been handed to the
    /// backend. Errors are surfaced so callers can log them, but the
    /// in-memory collection stays authoritative for the session either way.
    fn save(&self, problems: &[Problem]) -> Result<(), StoreError>;
}

/// Durable store: one human-readable JSON array, rewritten wholesale on
/// every save.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProblemStore for JsonFileStore {
    fn load(&self) -> Vec<Problem> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read data file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(problems) => problems,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse data file, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, problems: &[Problem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::DirectoryError(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(problems)?;
        fs::write(&self.path, json).map_err(|e| StoreError::WriteError(e.to_string()))?;
        Ok(())
    }
}

/// Session-only store. Selected with `storage_backend = "memory"`; nothing
/// survives process exit.
pub struct MemoryStore {
    records: Mutex<Vec<Problem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemStore for MemoryStore {
    fn load(&self) -> Vec<Problem> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn save(&self, problems: &[Problem]) -> Result<(), StoreError> {
        if let Ok(mut records) = self.records.lock() {
            *records = problems.to_vec();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, sample_problems};

    fn file_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("leettrack-data.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let (_dir, store) = file_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let (_dir, store) = file_store();
        fs::write(store.path(), "{ not json ]").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = file_store();
        let problems = sample_problems();
        store.save(&problems).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), problems.len());

        // Same ids, same fields, same ordering by id.
        let mut want: Vec<_> = problems.iter().collect();
        let mut got: Vec<_> = loaded.iter().collect();
        want.sort_by(|a, b| a.id.cmp(&b.id));
        got.sort_by(|a, b| a.id.cmp(&b.id));
        for (w, g) in want.iter().zip(got.iter()) {
            assert_eq!(w.id, g.id);
            assert_eq!(w.title, g.title);
            assert_eq!(w.difficulty, g.difficulty);
            assert_eq!(w.tags, g.tags);
            assert_eq!(w.date_added, g.date_added);
            assert_eq!(w.date_edited, g.date_edited);
        }
    }

    #[test]
    fn saving_twice_is_idempotent() {
        let (_dir, store) = file_store();
        let problems = sample_problems();

        store.save(&problems).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();
        store.save(&problems).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn save_overwrites_rather_than_appends() {
        let (_dir, store) = file_store();
        store.save(&sample_problems()).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn create_save_reload_scenario() {
        let (_dir, store) = file_store();
        let mut p = crate::models::Problem::new("Two Sum".to_string(), Difficulty::Easy);
        p.touch();
        store.save(std::slice::from_ref(&p)).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Two Sum");
        assert_eq!(loaded[0].difficulty, Difficulty::Easy);
        assert!(loaded[0].date_edited >= loaded[0].date_added);
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load().is_empty());
        store.save(&sample_problems()).unwrap();
        assert_eq!(store.load().len(), 3);
    }
}
