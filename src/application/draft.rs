//! Email Drafter - generates the support email text.
//!
//! One generation call with a fixed style contract: neutral greeting when
//! no recipient is known, a prose summary of the issue and prior steps,
//! a polite close, signed with the requester's name. When the caller
//! supplied workstation context, its footer is appended beneath the
//! generated draft.

use std::sync::Arc;

use crate::domain::triage::TriageContext;
use crate::ports::{CallPurpose, CompletionRequest, LanguageModel, LanguageModelError};

/// Support-email generator.
pub struct EmailDrafter {
    model: Arc<dyn LanguageModel>,
}

impl EmailDrafter {
    /// Creates a drafter over the given model.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Drafts the email for one issue.
    pub async fn draft(
        &self,
        issue: &str,
        context: &TriageContext,
    ) -> Result<String, LanguageModelError> {
        let instructions = format!(
            "You are a professional assistant that writes polite, conversational support request \
             emails. Open with 'To whom it may concern,' if no recipient name is known. \
             Summarize the issue described by the user below, including any steps they already \
             tried. Close with 'Thank you' and sign as '{}'. Avoid bullet lists; write in \
             natural prose.",
            context.signature()
        );

        let request = CompletionRequest::new(CallPurpose::EmailDraft)
            .with_system(instructions)
            .with_user(issue)
            .with_temperature(0.5);

        let response = self.model.complete(request).await?;
        let mut draft = response.content;

        if let Some(it) = &context.it_context {
            draft.push('\n');
            draft.push_str(&it.render_footer());
        }
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockLanguageModel;
    use crate::domain::schedule::Clock;
    use crate::domain::triage::{ItContext, ANONYMOUS_REQUESTER};

    fn context() -> TriageContext {
        let dt: chrono::NaiveDateTime = "2024-06-04T14:00:00".parse().unwrap();
        TriageContext::new(Clock::from_datetime(dt))
    }

    #[tokio::test]
    async fn prompt_carries_the_signature() {
        let mock = MockLanguageModel::new().with_reply("To whom it may concern, ...");
        let drafter = EmailDrafter::new(Arc::new(mock.clone()));

        let ctx = context().with_requester_name("Dr. Osei");
        drafter.draft("VPN keeps dropping", &ctx).await.unwrap();

        let text = mock.call_text(0).unwrap();
        assert!(text.contains("sign as 'Dr. Osei'"));
        assert!(text.contains("VPN keeps dropping"));
    }

    #[tokio::test]
    async fn anonymous_requests_use_the_placeholder_signature() {
        let mock = MockLanguageModel::new().with_reply("draft");
        let drafter = EmailDrafter::new(Arc::new(mock.clone()));

        drafter.draft("issue", &context()).await.unwrap();
        let text = mock.call_text(0).unwrap();
        assert!(text.contains(&format!("sign as '{ANONYMOUS_REQUESTER}'")));
    }

    #[tokio::test]
    async fn it_context_footer_is_appended() {
        let mock = MockLanguageModel::new().with_reply("Dear team, my VPN drops.");
        let drafter = EmailDrafter::new(Arc::new(mock));

        let ctx = context().with_it_context(ItContext {
            vpn: Some("Connected".to_string()),
            ..ItContext::default()
        });
        let draft = drafter.draft("vpn", &ctx).await.unwrap();

        assert!(draft.starts_with("Dear team, my VPN drops."));
        assert!(draft.contains(" IT CONTEXT"));
        assert!(draft.contains("- VPN: Connected"));
    }

    #[tokio::test]
    async fn generation_failure_propagates() {
        let mock = MockLanguageModel::new()
            .with_failure(LanguageModelError::unavailable("model down"));
        let drafter = EmailDrafter::new(Arc::new(mock));

        let err = drafter.draft("issue", &context()).await.unwrap_err();
        assert!(matches!(err, LanguageModelError::Unavailable { .. }));
    }
}
