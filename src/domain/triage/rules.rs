//! Keyword-override rules evaluated before the model classifier.
//!
//! The table is ordered and first-match-wins; a matched rule short-circuits
//! straight to its department with no model call, so a rule hit is fully
//! deterministic. Matching is case-insensitive substring over the issue
//! text. The phrases are curated from recurring tickets, not learned.

use once_cell::sync::Lazy;

use crate::domain::directory::DepartmentId;

/// One override rule: any phrase hit routes to the department.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Phrases matched case-insensitively as substrings.
    pub phrases: &'static [&'static str],
    /// Department the rule routes to.
    pub department: DepartmentId,
}

/// The ordered override table. Earlier rules win.
pub static KEYWORD_RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    vec![
        KeywordRule {
            phrases: &[
                "display scaling",
                "gaming mouse",
                "mouse speed",
                "mouse sensitivity",
                "duplicate dictation",
                "lossy image",
                "stat dx",
                "statdx",
                "server address",
            ],
            department: DepartmentId::WcinypIt,
        },
        KeywordRule {
            phrases: &[
                "g hub",
                "ghub",
                "mouse macro",
                "macro software",
                "fluency template",
                "outside studies",
                "outside study",
            ],
            department: DepartmentId::Radiqal,
        },
    ]
});

/// Scans the override table; returns the first matching department.
pub fn match_keyword_rule(issue: &str) -> Option<DepartmentId> {
    let lowered = issue.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|rule| rule.phrases.iter().any(|p| lowered.contains(p)))
        .map(|rule| rule.department)
}
