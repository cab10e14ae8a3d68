//! In-session query history.
//!
//! An explicit state object owned by the shell and passed to whatever
//! renders it; the retrieval core never sees this. Entries are appended
//! per answered query, never mutated, and cleared only on request.

use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub query: String,
    pub context: String,
    pub sources: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, query: String, context: String, sources: BTreeSet<String>) {
        self.entries.push(HistoryEntry { query, context, sources });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent first, the order a chat view shows them in.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }
}
