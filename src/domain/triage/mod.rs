//! Triage request/result types and keyword-override rules.
//!
//! The triage pipeline error enumeration lives with the orchestration
//! service in the application layer.

mod request;
mod result;
mod rules;

pub use request::{ItContext, TriageContext, TriageRequest, ANONYMOUS_REQUESTER};
pub use result::TriageResult;
pub use rules::{match_keyword_rule, KeywordRule, KEYWORD_RULES};
