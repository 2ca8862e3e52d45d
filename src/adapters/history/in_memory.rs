//! In-memory history store for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::history::HistoryEntry;
use crate::ports::{HistoryError, HistoryStore};

/// Vec-backed history store.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with entries.
    pub fn seeded(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
