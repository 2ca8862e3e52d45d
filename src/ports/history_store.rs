//! History Store Port - append-only triage log.
//!
//! The store is an ordered sequence of entries: append one, load all,
//! clear wholesale. Implementations must serialize appends internally so
//! concurrent triage calls cannot interleave a read-then-rewrite cycle.

use async_trait::async_trait;

use crate::domain::history::HistoryEntry;

/// Port for the append-only triage history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends one entry at the end of the log.
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError>;

    /// Loads the full log in append order.
    ///
    /// A persisted log that fails to parse is reported as
    /// [`HistoryError::Malformed`]; callers are expected to degrade it to
    /// an empty history rather than fail the request.
    async fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Removes every entry.
    async fn clear(&self) -> Result<(), HistoryError>;
}

/// History store failures.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The persisted log does not parse.
    #[error("history data malformed: {0}")]
    Malformed(String),

    /// Underlying storage failure.
    #[error("history io error: {0}")]
    Io(String),
}
