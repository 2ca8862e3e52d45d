//! Error types for the triage pipeline.
//!
//! One triage call either yields a complete result or exactly one of these
//! errors; there is no partial-success state.

use thiserror::Error;

use crate::domain::directory::UnknownDepartmentLabel;
use crate::ports::{HolidayError, LanguageModelError};

/// Errors surfaced by [`super::TriageService::triage`].
#[derive(Debug, Error)]
pub enum TriageError {
    /// The input was judged off-topic. User-correctable; not retried.
    #[error("request is out of scope: {explanation}")]
    ScopeRejected {
        /// The filter's explanation, suitable for showing to the user.
        explanation: String,
    },

    /// The classifier emitted a label outside the department enumeration.
    /// Internal inconsistency; never coerced to a default department.
    #[error("classifier returned an unknown department: {label:?}")]
    UnknownDepartment {
        /// The offending label, verbatim.
        label: String,
    },

    /// A classification, generation, or holiday-lookup call failed.
    /// Transient; the caller may retry the whole request.
    #[error("external service failure: {0}")]
    ExternalService(#[from] ExternalServiceError),
}

/// The external capability that failed.
#[derive(Debug, Error)]
pub enum ExternalServiceError {
    /// Language model call failed or returned unparseable content.
    #[error(transparent)]
    Model(#[from] LanguageModelError),

    /// Holiday calendar lookup failed.
    #[error(transparent)]
    Holiday(#[from] HolidayError),
}

impl From<LanguageModelError> for TriageError {
    fn from(err: LanguageModelError) -> Self {
        TriageError::ExternalService(ExternalServiceError::Model(err))
    }
}

impl From<HolidayError> for TriageError {
    fn from(err: HolidayError) -> Self {
        TriageError::ExternalService(ExternalServiceError::Holiday(err))
    }
}

impl From<UnknownDepartmentLabel> for TriageError {
    fn from(err: UnknownDepartmentLabel) -> Self {
        TriageError::UnknownDepartment { label: err.label }
    }
}
