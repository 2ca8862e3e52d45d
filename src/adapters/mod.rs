//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod history;
pub mod holiday;

pub use ai::{MockLanguageModel, OpenAiConfig, OpenAiModel, QueuedReply};
pub use history::{FileHistoryStore, InMemoryHistoryStore};
pub use holiday::UsFederalHolidays;
