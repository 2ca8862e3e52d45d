//! Ports - capability interfaces injected into the triage core.
//!
//! Each port abstracts one external dependency so the real backing service
//! or a test double can be substituted without touching triage logic.

mod history_store;
mod holiday_calendar;
mod language_model;

pub use history_store::{HistoryError, HistoryStore};
pub use holiday_calendar::{HolidayCalendar, HolidayError};
pub use language_model::{
    CallPurpose, CompletionRequest, CompletionResponse, LanguageModel, LanguageModelError,
    Message, MessageRole, RequestMetadata,
};
