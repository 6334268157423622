//! Bounded translation history.
//!
//! Successful translations are logged newest-first, capped, and deduped
//! by input text: re-translating a phrase moves it to the front instead
//! of piling up copies.

use crate::language::TranslationDirection;
use crate::store::{HISTORY_KEY, Storage, StoreResult};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default maximum number of retained history entries
pub const DEFAULT_HISTORY_CAP: usize = 15;

/// Milliseconds since the Unix epoch; entry and dictionary ids use this.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One committed translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation timestamp in milliseconds, doubles as the entry id
    pub id: u64,
    pub input: String,
    pub output: String,
    pub direction: TranslationDirection,
}

/// Bounded, newest-first log of committed translations.
#[derive(Debug, Clone)]
pub struct TranslationHistory {
    entries: Vec<HistoryEntry>,
    cap: usize,
}

impl TranslationHistory {
    pub fn new(cap: usize) -> Self {
        TranslationHistory {
            entries: Vec::new(),
            cap,
        }
    }

    /// Build a log from already-persisted entries, enforcing the cap.
    pub fn from_entries(entries: Vec<HistoryEntry>, cap: usize) -> Self {
        let mut history = TranslationHistory { entries, cap };
        history.entries.truncate(cap);
        history
    }

    /// Record a successful translation.
    ///
    /// Any prior entry with the same input text is evicted first, then
    /// the new entry is prepended and the log truncated to the cap.
    pub fn record(&mut self, input: &str, output: &str, direction: &TranslationDirection) {
        self.entries.retain(|entry| entry.input != input);
        self.entries.insert(
            0,
            HistoryEntry {
                id: now_millis(),
                input: input.to_string(),
                output: output.to_string(),
                direction: direction.clone(),
            },
        );
        self.entries.truncate(self.cap);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load the persisted log, seeding an empty one when the blob is
    /// absent or unreadable.
    pub fn load(storage: &Storage, cap: usize) -> Self {
        match storage.read::<Vec<HistoryEntry>>(HISTORY_KEY) {
            Ok(Some(entries)) => Self::from_entries(entries, cap),
            Ok(None) => Self::new(cap),
            Err(error) => {
                tracing::warn!(%error, "translation history unreadable, starting empty");
                Self::new(cap)
            }
        }
    }

    /// Rewrite the whole persisted log.
    pub fn persist(&self, storage: &Storage) -> StoreResult<()> {
        storage.write(HISTORY_KEY, &self.entries)
    }
}
