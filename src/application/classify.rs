//! Department Classifier - maps free text to exactly one department.
//!
//! The keyword-override table is consulted first and takes documented
//! precedence: a hit routes deterministically with no model call. The
//! model is otherwise constrained to a single-field JSON label drawn from
//! the department enumeration; any other label is an error, never a
//! default.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::directory::DepartmentId;
use crate::domain::triage::match_keyword_rule;
use crate::ports::{CallPurpose, CompletionRequest, LanguageModel};

use super::errors::TriageError;
use super::structured::parse_structured;

const TRIAGE_INSTRUCTIONS: &str = "\
Given a user support issue, choose exactly one of the following departments and return only JSON:\n\
{\"department\": \"Hospital Reading Rooms\"},\n\
{\"department\": \"Virtual HelpDesk\"},\n\
{\"department\": \"WCINYP IT\"},\n\
{\"department\": \"Radiqal\"}\n\
\n\
Use the following examples as guidance:\n\
\n\
- Hospital Reading Rooms: clinical PACS/viewer crashes or freezes during CT/MRI interpretation.\n\
- Virtual HelpDesk: in-hospital desktop/login or certificate issues; Zoom support available.\n\
- WCINYP IT: remote/home issues such as VPN, Outlook, EPIC or email sync; display scaling, \
gaming mouse speed, duplicate dictation, VuePACS lossy images, Stat DX not launching, hardware \
problems, server address corrections (Olea/TeraRecon/Dynacad), or general workstation/network setup.\n\
- Radiqal: QA/discrepancy tickets via Radiqal within PACS; mouse macros not working in G HUB, \
unable to access Fluency templates, or unable to view outside studies in VuePACS.\n\
\n\
Decide only based on the issue type and nature - not personal preference or tone. \
Do not return multiple departments.";

#[derive(Debug, Deserialize)]
struct DepartmentLabel {
    department: String,
}

/// Keyword-table-then-model classifier.
pub struct DepartmentClassifier {
    model: Arc<dyn LanguageModel>,
}

impl DepartmentClassifier {
    /// Creates a classifier over the given model.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Assigns exactly one department to the issue.
    pub async fn classify(&self, issue: &str) -> Result<DepartmentId, TriageError> {
        if let Some(department) = match_keyword_rule(issue) {
            tracing::debug!(%department, "keyword override matched; skipping model call");
            return Ok(department);
        }

        let request = CompletionRequest::new(CallPurpose::Classification)
            .with_system(TRIAGE_INSTRUCTIONS)
            .with_user(issue)
            .with_temperature(0.0);

        let response = self.model.complete(request).await?;
        let label: DepartmentLabel = parse_structured(&response.content)?;
        let department = label.department.parse::<DepartmentId>()?;
        tracing::debug!(%department, "model classified issue");
        Ok(department)
    }
}
