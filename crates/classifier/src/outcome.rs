//! Normalized Classifier Outcome

use crate::{ClassifierError, ClassifierResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;
use working_memory::{Fact, MAX_SEVERITY_LEVEL, MIN_SEVERITY_LEVEL};

/// Classifier result after boundary normalization
///
/// `succeeded` holds exactly when `suggested_level` is in 1..=6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierOutcome {
    pub suggested_level: Option<u8>,
    pub detected_keywords: Vec<String>,
    pub succeeded: bool,
}

impl ClassifierOutcome {
    /// A usable suggestion, or a failure if `level` is out of range
    pub fn suggested(level: i64, detected_keywords: Vec<String>) -> Self {
        match u8::try_from(level) {
            Ok(l) if (MIN_SEVERITY_LEVEL..=MAX_SEVERITY_LEVEL).contains(&l) => Self {
                suggested_level: Some(l),
                detected_keywords,
                succeeded: true,
            },
            _ => {
                warn!("Classifier level {} is out of range", level);
                Self::failed()
            }
        }
    }

    pub fn failed() -> Self {
        Self {
            suggested_level: None,
            detected_keywords: Vec::new(),
            succeeded: false,
        }
    }
}

impl From<ClassifierOutcome> for Fact {
    fn from(outcome: ClassifierOutcome) -> Self {
        Fact::ClassifierResult {
            suggested_level: outcome.suggested_level,
            detected_keywords: outcome.detected_keywords,
            succeeded: outcome.succeeded,
        }
    }
}

/// Normalize a classifier call result
///
/// Never fails: errors and missing or out-of-range levels all become an
/// unsuccessful outcome with no keywords.
pub fn normalize(result: Result<ClassifierResponse, ClassifierError>) -> ClassifierOutcome {
    match result {
        Ok(response) => match response.level() {
            Some(level) => ClassifierOutcome::suggested(level, response.detected_keywords),
            None => {
                warn!("Classifier returned no usable level");
                ClassifierOutcome::failed()
            }
        },
        Err(e) => {
            warn!("Classifier call failed: {}", e);
            ClassifierOutcome::failed()
        }
    }
}
