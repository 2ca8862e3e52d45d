//! Domain layer - pure triage logic, no I/O.

pub mod directory;
pub mod faq;
pub mod history;
pub mod schedule;
pub mod triage;
