//! FaqService - synthesizes themed FAQs from the triage history.
//!
//! One generation call clusters the most recent requests (at most 20) into
//! up to five themes; each theme's representative input is re-classified
//! (keyword table first) so the FAQ can echo the right contact block.
//! Empty history means an empty list with no model call; any failure in
//! generation, parsing, or per-theme classification degrades to an empty
//! list with a warning instead of blocking the caller.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::directory::{Directory, DIRECTORY};
use crate::domain::faq::FaqItem;
use crate::domain::history::HistoryEntry;
use crate::ports::{CallPurpose, CompletionRequest, HistoryStore, LanguageModel};

use super::classify::DepartmentClassifier;
use super::errors::TriageError;
use super::structured::parse_structured;

/// How many recent history entries feed the digest prompt.
const MAX_HISTORY_ENTRIES: usize = 20;
/// How many themes a digest may yield.
const MAX_THEMES: usize = 5;

const DIGEST_INSTRUCTIONS: &str = "\
You are an expert assistant that reads user support request descriptions and groups them by \
technical theme (e.g., VPN issues, login loops). For each theme, produce a JSON object with keys:\n\
- question: a short user-like question\n\
- steps: a list of clear self-help suggestions\n\
- input_example: the exact original user request most relevant to this theme\n\
Return up to five objects as a JSON array.";

#[derive(Debug, Deserialize)]
struct Theme {
    #[serde(default = "default_question")]
    question: String,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    input_example: String,
}

fn default_question() -> String {
    "FAQ".to_string()
}

/// History-to-FAQ synthesizer.
pub struct FaqService {
    directory: Directory,
    model: Arc<dyn LanguageModel>,
    classifier: DepartmentClassifier,
    history: Arc<dyn HistoryStore>,
}

impl FaqService {
    /// Creates a service over the hospital default directory.
    pub fn new(model: Arc<dyn LanguageModel>, history: Arc<dyn HistoryStore>) -> Self {
        Self::with_directory(DIRECTORY.clone(), model, history)
    }

    /// Creates a service over an explicit directory.
    pub fn with_directory(
        directory: Directory,
        model: Arc<dyn LanguageModel>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            directory,
            classifier: DepartmentClassifier::new(model.clone()),
            model,
            history,
        }
    }

    /// Synthesizes the FAQ list from the store's accumulated history.
    pub async fn synthesize(&self) -> Vec<FaqItem> {
        let history = match self.history.load().await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "history unavailable; skipping FAQ digest");
                return Vec::new();
            }
        };
        self.synthesize_from(&history).await
    }

    /// Synthesizes the FAQ list from an explicit history sequence.
    pub async fn synthesize_from(&self, history: &[HistoryEntry]) -> Vec<FaqItem> {
        if history.is_empty() {
            return Vec::new();
        }

        let skip = history.len().saturating_sub(MAX_HISTORY_ENTRIES);
        let inputs: Vec<&str> = history[skip..].iter().map(|e| e.input.as_str()).collect();

        match self.digest(&inputs).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "FAQ synthesis failed; returning empty digest");
                Vec::new()
            }
        }
    }

    async fn digest(&self, inputs: &[&str]) -> Result<Vec<FaqItem>, TriageError> {
        let listing = serde_json::to_string_pretty(inputs)
            .map_err(|e| crate::ports::LanguageModelError::parse(e.to_string()))?;

        let request = CompletionRequest::new(CallPurpose::FaqDigest)
            .with_system(DIGEST_INSTRUCTIONS)
            .with_user(format!("Here are recent support requests: {listing}"))
            .with_temperature(0.3);

        let response = self.model.complete(request).await?;
        let mut themes: Vec<Theme> = parse_structured(&response.content)?;
        themes.truncate(MAX_THEMES);

        let mut items = Vec::with_capacity(themes.len());
        for theme in themes {
            let department = self.classifier.classify(&theme.input_example).await?;
            let row = self.directory.get(department);
            items.push(FaqItem::compose(theme.question, &theme.steps, row));
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryHistoryStore, MockLanguageModel};
    use crate::domain::directory::DepartmentId;
    use crate::domain::triage::TriageResult;
    use crate::ports::LanguageModelError;
    use chrono::Utc;

    fn entry(input: &str, department: DepartmentId) -> HistoryEntry {
        let dir = Directory::hospital_defaults();
        let result = TriageResult::assemble(dir.get(department), true, None, "draft".into());
        HistoryEntry::from_result(input, &result, Utc::now())
    }

    fn seeded_history(inputs: &[&str]) -> Arc<InMemoryHistoryStore> {
        let entries = inputs
            .iter()
            .map(|i| entry(i, DepartmentId::WcinypIt))
            .collect();
        Arc::new(InMemoryHistoryStore::seeded(entries))
    }

    #[tokio::test]
    async fn empty_history_yields_empty_list_without_a_model_call() {
        let mock = MockLanguageModel::new();
        let service = FaqService::new(
            Arc::new(mock.clone()),
            Arc::new(InMemoryHistoryStore::new()),
        );

        assert!(service.synthesize().await.is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn themes_become_faq_items_with_contact_blocks() {
        let digest = r#"[
            {
                "question": "Why does my VPN keep dropping?",
                "steps": ["Restart the VPN client", "Check home network"],
                "input_example": "vpn drops every hour"
            }
        ]"#;
        let mock = MockLanguageModel::new()
            .with_reply(digest)
            .with_reply(r#"{"department": "WCINYP IT"}"#);
        let service = FaqService::new(Arc::new(mock), seeded_history(&["vpn drops every hour"]));

        let items = service.synthesize().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Why does my VPN keep dropping?");
        assert!(items[0].answer.contains("1. Restart the VPN client"));
        assert!(items[0].answer.contains("**Department**: WCINYP IT"));
    }

    #[tokio::test]
    async fn keyword_matched_example_skips_the_classification_call() {
        let digest = r#"[
            {
                "question": "How do I fix G HUB macros?",
                "steps": ["Reinstall G HUB"],
                "input_example": "g hub mouse macro not firing"
            }
        ]"#;
        let mock = MockLanguageModel::new().with_reply(digest);
        let service = FaqService::new(
            Arc::new(mock.clone()),
            seeded_history(&["g hub mouse macro not firing"]),
        );

        let items = service.synthesize().await;
        assert_eq!(items.len(), 1);
        assert!(items[0].answer.contains("**Department**: Radiqal"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn generation_failure_degrades_to_empty() {
        let mock = MockLanguageModel::new()
            .with_failure(LanguageModelError::unavailable("model down"));
        let service = FaqService::new(Arc::new(mock), seeded_history(&["anything"]));
        assert!(service.synthesize().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_digest_degrades_to_empty() {
        let mock = MockLanguageModel::new().with_reply("here are some thoughts, no JSON");
        let service = FaqService::new(Arc::new(mock), seeded_history(&["anything"]));
        assert!(service.synthesize().await.is_empty());
    }

    #[tokio::test]
    async fn digest_prompt_is_bounded_to_recent_entries() {
        let inputs: Vec<String> = (0..30).map(|i| format!("issue number {i}")).collect();
        let refs: Vec<&str> = inputs.iter().map(|s| s.as_str()).collect();

        let mock = MockLanguageModel::new().with_reply("[]");
        let service = FaqService::new(Arc::new(mock.clone()), seeded_history(&refs));

        assert!(service.synthesize().await.is_empty());
        let prompt = mock.call_text(0).unwrap();
        assert!(!prompt.contains("issue number 9"));
        assert!(prompt.contains("issue number 10"));
        assert!(prompt.contains("issue number 29"));
    }

    #[tokio::test]
    async fn at_most_five_themes_are_composed() {
        let theme = |n: u32| {
            format!(
                r#"{{"question": "Q{n}", "steps": ["s"], "input_example": "g hub macro"}}"#
            )
        };
        let digest = format!(
            "[{}]",
            (0..7).map(theme).collect::<Vec<_>>().join(",")
        );
        let mock = MockLanguageModel::new().with_reply(digest);
        let service = FaqService::new(Arc::new(mock), seeded_history(&["g hub macro"]));

        let items = service.synthesize().await;
        assert_eq!(items.len(), 5);
    }
}
