//! Mock language model for tests.
//!
//! Queued replies are consumed in order; every request is recorded so tests
//! can assert on prompts, purposes and call counts. An empty queue is a
//! test bug and fails loudly as an `Unavailable` error.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    CallPurpose, CompletionRequest, CompletionResponse, LanguageModel, LanguageModelError,
};

/// One scripted reply.
#[derive(Debug)]
pub enum QueuedReply {
    /// Return this content successfully.
    Content(String),
    /// Fail with this error.
    Failure(LanguageModelError),
}

/// Scripted language model double.
#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel {
    replies: Arc<Mutex<VecDeque<QueuedReply>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLanguageModel {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(QueuedReply::Content(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, error: LanguageModelError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(QueuedReply::Failure(error));
        self
    }

    /// Number of completion calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Purposes of the calls made so far, in order.
    pub fn call_purposes(&self) -> Vec<CallPurpose> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.metadata.purpose)
            .collect()
    }

    /// Full text of the nth call's messages, joined for easy matching.
    pub fn call_text(&self, index: usize) -> Option<String> {
        self.calls.lock().unwrap().get(index).map(|c| {
            c.messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LanguageModelError> {
        self.calls.lock().unwrap().push(request);

        match self.replies.lock().unwrap().pop_front() {
            Some(QueuedReply::Content(content)) => Ok(CompletionResponse {
                content: content.trim().to_string(),
                model: "mock".to_string(),
            }),
            Some(QueuedReply::Failure(error)) => Err(error),
            None => Err(LanguageModelError::unavailable(
                "mock reply queue exhausted",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let mock = MockLanguageModel::new()
            .with_reply("first")
            .with_reply("second");

        let req = || CompletionRequest::new(CallPurpose::Classification).with_user("x");
        assert_eq!(mock.complete(req()).await.unwrap().content, "first");
        assert_eq!(mock.complete(req()).await.unwrap().content, "second");
        assert!(mock.complete(req()).await.is_err());
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn queued_failures_surface_as_errors() {
        let mock = MockLanguageModel::new().with_failure(LanguageModelError::Timeout {
            timeout_secs: 30,
        });
        let err = mock
            .complete(CompletionRequest::new(CallPurpose::ScopeCheck).with_user("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LanguageModelError::Timeout { .. }));
    }

    #[tokio::test]
    async fn calls_are_recorded_with_purpose_and_text() {
        let mock = MockLanguageModel::new().with_reply("ok");
        mock.complete(
            CompletionRequest::new(CallPurpose::EmailDraft)
                .with_system("be polite")
                .with_user("my issue"),
        )
        .await
        .unwrap();

        assert_eq!(mock.call_purposes(), vec![CallPurpose::EmailDraft]);
        let text = mock.call_text(0).unwrap();
        assert!(text.contains("be polite"));
        assert!(text.contains("my issue"));
    }
}
