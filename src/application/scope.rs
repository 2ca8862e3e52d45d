//! Scope Filter - rejects off-topic input before triage.
//!
//! One classification call flags philosophical/existential/off-topic
//! content. An off-topic verdict aborts the pipeline before any department
//! is assigned; a call failure or unparseable verdict surfaces as a
//! transient external-service error rather than being treated as either
//! in-scope or rejected.

use serde::Deserialize;
use std::sync::Arc;

use crate::ports::{CallPurpose, CompletionRequest, LanguageModel, LanguageModelError};

use super::structured::parse_structured;

const SCOPE_INSTRUCTIONS: &str = "\
Determine if the user's message is off-topic (philosophical, existential, etc.).\n\
Only allow clear radiology/IT support requests through.\n\
Respond with only JSON: {\"is_off_topic\": true or false, \"explanation\": \"one sentence\"}.";

/// The filter's structured verdict.
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeVerdict {
    /// Whether the input should be rejected.
    pub is_off_topic: bool,
    /// One-sentence rationale, shown to the user on rejection.
    pub explanation: String,
}

/// Pre-triage off-topic filter.
pub struct ScopeFilter {
    model: Arc<dyn LanguageModel>,
}

impl ScopeFilter {
    /// Creates a filter over the given model.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Classifies one issue as in- or out-of-scope.
    pub async fn check(&self, issue: &str) -> Result<ScopeVerdict, LanguageModelError> {
        let request = CompletionRequest::new(CallPurpose::ScopeCheck)
            .with_system(SCOPE_INSTRUCTIONS)
            .with_user(issue)
            .with_temperature(0.0);

        let response = self.model.complete(request).await?;
        parse_structured(&response.content)
    }
}
