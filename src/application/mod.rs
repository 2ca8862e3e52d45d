//! Application layer - the triage and FAQ orchestration services.

mod classify;
mod draft;
mod errors;
mod faq_service;
mod scope;
mod structured;
mod triage_service;

pub use classify::DepartmentClassifier;
pub use draft::EmailDrafter;
pub use errors::{ExternalServiceError, TriageError};
pub use faq_service::FaqService;
pub use scope::{ScopeFilter, ScopeVerdict};
pub use triage_service::TriageService;
