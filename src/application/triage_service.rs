//! TriageService - the caller-facing triage entry point.
//!
//! Pipeline per request, strictly sequential: scope check, department
//! classification (keyword table first), availability evaluation with
//! fallback selection, email draft. Either a complete [`TriageResult`]
//! comes back or a [`TriageError`]; nothing partial. Completed results are
//! appended to the history log; an append failure is logged, not surfaced,
//! since the requester already has their answer.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::directory::{Directory, DIRECTORY};
use crate::domain::history::HistoryEntry;
use crate::domain::schedule::{self, HoursSpec};
use crate::domain::triage::{TriageRequest, TriageResult};
use crate::ports::{HistoryStore, HolidayCalendar, LanguageModel};

use super::classify::DepartmentClassifier;
use super::draft::EmailDrafter;
use super::errors::TriageError;
use super::scope::ScopeFilter;

/// Orchestrates one triage request end to end.
pub struct TriageService {
    directory: Directory,
    scope: ScopeFilter,
    classifier: DepartmentClassifier,
    drafter: EmailDrafter,
    holidays: Arc<dyn HolidayCalendar>,
    history: Arc<dyn HistoryStore>,
}

impl TriageService {
    /// Creates a service over the hospital default directory.
    pub fn new(
        model: Arc<dyn LanguageModel>,
        holidays: Arc<dyn HolidayCalendar>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self::with_directory(DIRECTORY.clone(), model, holidays, history)
    }

    /// Creates a service over an explicit directory.
    pub fn with_directory(
        directory: Directory,
        model: Arc<dyn LanguageModel>,
        holidays: Arc<dyn HolidayCalendar>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            directory,
            scope: ScopeFilter::new(model.clone()),
            classifier: DepartmentClassifier::new(model.clone()),
            drafter: EmailDrafter::new(model),
            holidays,
            history,
        }
    }

    /// Triages one request.
    pub async fn triage(&self, request: TriageRequest) -> Result<TriageResult, TriageError> {
        let verdict = self.scope.check(&request.issue).await?;
        if verdict.is_off_topic {
            tracing::info!(explanation = %verdict.explanation, "request rejected as out of scope");
            return Err(TriageError::ScopeRejected {
                explanation: verdict.explanation,
            });
        }

        let department = self.classifier.classify(&request.issue).await?;
        let row = self.directory.get(department);
        let clock = request.context.clock;

        // The holiday calendar is only consulted for window-shaped hours;
        // 24/7 and unrestricted rows skip the lookup entirely.
        let available = match row.hours_spec {
            HoursSpec::AlwaysOpen | HoursSpec::Unrestricted => true,
            HoursSpec::Window { .. } => {
                let is_public_holiday = self.holidays.is_holiday(clock.date).await?;
                schedule::is_available(&row.hours_spec, &clock, is_public_holiday)
            }
        };
        let fallback = if available {
            None
        } else {
            schedule::pick_fallback(&self.directory, department, clock.time)
        };

        let email_draft = self.drafter.draft(&request.issue, &request.context).await?;
        let result = TriageResult::assemble(row, available, fallback, email_draft);

        tracing::info!(
            %department,
            support_available = available,
            fallback = ?fallback,
            "triage complete"
        );

        let entry = HistoryEntry::from_result(request.issue.as_str(), &result, Utc::now());
        if let Err(e) = self.history.append(entry).await {
            tracing::warn!(error = %e, "failed to append triage history entry");
        }

        Ok(result)
    }
}
