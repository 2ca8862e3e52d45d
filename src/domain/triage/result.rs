//! The aggregate answer to one triage submission.

use serde::{Deserialize, Serialize};

use crate::domain::directory::{Department, DepartmentId};

/// Everything the caller gets back for one triage submission.
///
/// Contact fields are copied out of the directory row so the result stays
/// self-contained once returned. A result is only constructed complete:
/// there is no state where contact info exists without an email draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResult {
    /// Department the issue was routed to.
    pub department: DepartmentId,
    /// Phone contact.
    pub phone: String,
    /// Email contact.
    pub email: String,
    /// Other contact channels.
    pub other: String,
    /// Department description.
    pub note: String,
    /// Published hours string.
    pub hours: String,
    /// Whether the department is open at the caller's clock.
    pub support_available: bool,
    /// Alternate department proposed when closed.
    pub fallback_department: Option<DepartmentId>,
    /// Generated email draft (footer included when the caller supplied
    /// workstation context).
    pub email_draft: String,
}

impl TriageResult {
    /// Assembles a result from the directory row and the computed pieces.
    pub fn assemble(
        row: &Department,
        support_available: bool,
        fallback_department: Option<DepartmentId>,
        email_draft: String,
    ) -> Self {
        Self {
            department: row.id,
            phone: row.phone.clone(),
            email: row.email.clone(),
            other: row.other.clone(),
            note: row.note.clone(),
            hours: row.hours.clone(),
            support_available,
            fallback_department,
            email_draft,
        }
    }
}
