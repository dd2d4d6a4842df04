//! Classifier Response Payload

use crate::ClassifierError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Suggested level as returned by a classifier
///
/// Either a bare integer or a label such as `"Level 4"`. Any other label
/// (for example `"No Level Suggested"`) carries no suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestedLevel {
    Number(i64),
    Label(String),
}

impl SuggestedLevel {
    /// Numeric level, if one can be read
    pub fn value(&self) -> Option<i64> {
        match self {
            SuggestedLevel::Number(n) => Some(*n),
            SuggestedLevel::Label(label) => label
                .trim()
                .strip_prefix("Level")
                .and_then(|rest| rest.trim().parse().ok()),
        }
    }
}

/// Structured classifier reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierResponse {
    #[serde(default)]
    pub suggested_level: Option<SuggestedLevel>,
    #[serde(default)]
    pub detected_keywords: Vec<String>,
}

impl ClassifierResponse {
    pub fn new(level: Option<i64>, detected_keywords: Vec<String>) -> Self {
        Self {
            suggested_level: level.map(SuggestedLevel::Number),
            detected_keywords,
        }
    }

    /// A reply with no suggestion and no keywords
    pub fn none() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Option<i64> {
        self.suggested_level.as_ref().and_then(SuggestedLevel::value)
    }
}

/// Parse a raw classifier reply
///
/// Accepts the JSON object bare or wrapped in a ```` ```json ```` fence.
pub fn parse_response(text: &str) -> Result<ClassifierResponse, ClassifierError> {
    let trimmed = text.trim();
    let payload = trimmed
        .strip_prefix("```json")
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    debug!("Parsing classifier payload ({} bytes)", payload.len());
    Ok(serde_json::from_str(payload)?)
}
