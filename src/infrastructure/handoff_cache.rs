// src/infrastructure/handoff_cache.rs
//
// Hand-off cache bridging resolve and load.
//
// CRITICAL RULES:
// - Entries are single-use: `take` removes what it returns
// - Distinct keys are safe under concurrent insert/take
// - Same-key races are last-writer-wins; the host is expected to
//   serialize or deduplicate identical requests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Consume-on-read document store keyed by resolved path.
///
/// This is an explicit, injectable value passed to the adapter at
/// construction, never a process-wide singleton.
#[derive(Debug, Default)]
pub struct HandoffCache {
    entries: Mutex<HashMap<PathBuf, String>>,
}

impl HandoffCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document for a later `take`. Replaces any previous entry
    /// for the same path.
    pub fn insert(&self, path: PathBuf, document: String) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path, document);
    }

    /// Remove and return the document for `path`, if present.
    pub fn take(&self, path: &Path) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
