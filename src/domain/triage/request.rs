//! Per-submission request types.

use crate::domain::schedule::Clock;

/// Placeholder signature when the requester's name is unknown.
pub const ANONYMOUS_REQUESTER: &str = "Radiology Staff Member";

/// Caller-owned context for one triage submission.
#[derive(Debug, Clone)]
pub struct TriageContext {
    /// Requester name, used to sign the email draft.
    pub requester_name: Option<String>,
    /// The caller's "now".
    pub clock: Clock,
    /// Workstation details appended beneath the email draft.
    pub it_context: Option<ItContext>,
}

impl TriageContext {
    /// Creates a context for the given clock with no requester details.
    pub fn new(clock: Clock) -> Self {
        Self {
            requester_name: None,
            clock,
            it_context: None,
        }
    }

    /// Sets the requester name.
    pub fn with_requester_name(mut self, name: impl Into<String>) -> Self {
        self.requester_name = Some(name.into());
        self
    }

    /// Attaches workstation details for the email footer.
    pub fn with_it_context(mut self, it: ItContext) -> Self {
        self.it_context = Some(it);
        self
    }

    /// The name to sign drafts with.
    pub fn signature(&self) -> &str {
        self.requester_name.as_deref().unwrap_or(ANONYMOUS_REQUESTER)
    }
}

/// One triage submission: the issue text plus its context.
#[derive(Debug, Clone)]
pub struct TriageRequest {
    /// Free-text issue description.
    pub issue: String,
    /// Caller context.
    pub context: TriageContext,
}

impl TriageRequest {
    /// Creates a request, trimming the issue text.
    pub fn new(issue: impl Into<String>, context: TriageContext) -> Self {
        Self {
            issue: issue.into().trim().to_string(),
            context,
        }
    }
}

/// Workstation details rendered as a footer beneath the email draft.
#[derive(Debug, Clone, Default)]
pub struct ItContext {
    pub ip_address: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub vpn: Option<String>,
    pub browser_user_agent: Option<String>,
    pub pacs_version: Option<String>,
    pub medicalis_version: Option<String>,
    pub fluency_version: Option<String>,
    pub os_version: Option<String>,
}

impl ItContext {
    /// Renders the footer block appended beneath a drafted email.
    pub fn render_footer(&self) -> String {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        [
            String::new(),
            "----------------------------------------".to_string(),
            " IT CONTEXT".to_string(),
            "----------------------------------------".to_string(),
            String::new(),
            "---".to_string(),
            format!("- IP Address: {}", field(&self.ip_address)),
            format!("- Location: {}", field(&self.location)),
            format!("- Phone Number: {}", field(&self.phone_number)),
            format!("- VPN: {}", field(&self.vpn)),
            format!("- Browser: {}", field(&self.browser_user_agent)),
            format!("- PACS Version: {}", field(&self.pacs_version)),
            format!("- Medicalis Version: {}", field(&self.medicalis_version)),
            format!("- Fluency Version: {}", field(&self.fluency_version)),
            format!("- OS Version: {}", field(&self.os_version)),
        ]
        .join("\n")
    }
}
