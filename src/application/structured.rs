//! Parsing of structured (JSON) model output.
//!
//! Models wrap JSON in markdown code fences and occasionally double-encode
//! the payload as a JSON string; both are tolerated here so each caller
//! doesn't re-implement the same cleanup.

use serde::de::DeserializeOwned;

use crate::ports::LanguageModelError;

/// Parses model output as JSON after stripping decoration.
pub(crate) fn parse_structured<T: DeserializeOwned>(content: &str) -> Result<T, LanguageModelError> {
    let cleaned = strip_code_fences(content);

    match serde_json::from_str(cleaned) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            // Doubly-encoded payload: a JSON string containing JSON.
            if let Ok(inner) = serde_json::from_str::<String>(cleaned) {
                return serde_json::from_str(&inner)
                    .map_err(|e| LanguageModelError::parse(format!("inner payload: {e}")));
            }
            Err(LanguageModelError::parse(first_err.to_string()))
        }
    }
}

/// Removes a surrounding ```json ... ``` (or bare ```) fence.
fn strip_code_fences(content: &str) -> &str {
    let s = content.trim();
    let s = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```"))
        .unwrap_or(s);
    s.strip_suffix("```").unwrap_or(s).trim()
}
