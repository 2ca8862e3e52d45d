//! Append-only triage history.
//!
//! One entry per completed triage call. Entries are never mutated after
//! creation; the store may be cleared wholesale. The contact snapshot is
//! copied from the result at append time so later directory edits cannot
//! rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::directory::DepartmentId;
use crate::domain::triage::TriageResult;

/// A single persisted triage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the request was triaged.
    pub timestamp: DateTime<Utc>,
    /// The original free-text issue.
    pub input: String,
    /// Department the issue was routed to.
    pub department: DepartmentId,
    /// Contact card as returned to the requester.
    pub contact: ContactSnapshot,
}

impl HistoryEntry {
    /// Records a completed triage result.
    pub fn from_result(input: impl Into<String>, result: &TriageResult, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at,
            input: input.into(),
            department: result.department,
            contact: ContactSnapshot {
                phone: result.phone.clone(),
                email: result.email.clone(),
                other: result.other.clone(),
                note: result.note.clone(),
                hours: result.hours.clone(),
                support_available: result.support_available,
                fallback_department: result.fallback_department,
            },
        }
    }
}

/// Contact details frozen at triage time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub phone: String,
    pub email: String,
    pub other: String,
    pub note: String,
    pub hours: String,
    pub support_available: bool,
    pub fallback_department: Option<DepartmentId>,
}
