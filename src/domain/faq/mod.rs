//! FAQ synthesis output types.
//!
//! FAQ items are derived from history on every request and never persisted.

use serde::{Deserialize, Serialize};

use crate::domain::directory::Department;

/// One synthesized FAQ entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    /// Short user-like question for the theme.
    pub question: String,
    /// Composed answer: self-help steps plus the resolved contact block.
    pub answer: String,
}

impl FaqItem {
    /// Composes an item from generated steps and the resolved department.
    pub fn compose(question: impl Into<String>, steps: &[String], department: &Department) -> Self {
        let mut answer = String::from("\n### Self-Help Steps\n");
        answer.push_str(
            &steps
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. {s}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        answer.push_str("\n\n### Recommended Support Contact");
        answer.push_str(&format!("\n**Department**: {}", department.id));
        if !department.phone.is_empty() {
            answer.push_str(&format!("\n**Phone**: {}", department.phone));
        }
        if !department.email.is_empty() {
            answer.push_str(&format!("\n**Email**: {}", department.email));
        }

        Self {
            question: question.into(),
            answer,
        }
    }
}
