//! Conduct Classifier Boundary
//!
//! Turns a free-text conduct description into a suggested severity level
//! and the keywords that support it. The inference engine never calls a
//! classifier itself; the session does it once, up front, and declares the
//! normalized outcome as a fact.

mod keyword;
mod outcome;
mod prompt;
mod response;
mod taxonomy;

pub use keyword::KeywordClassifier;
pub use outcome::{normalize, ClassifierOutcome};
pub use prompt::{build_prompt, Completion, PromptClassifier};
pub use response::{parse_response, ClassifierResponse, SuggestedLevel};
pub use taxonomy::Taxonomy;

use thiserror::Error;

/// Errors at the classifier boundary
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier service failed: {0}")]
    Service(String),
    #[error("Malformed classifier payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("Conduct description is empty")]
    EmptyDescription,
}

/// A component that suggests a severity level for a conduct description
pub trait Classifier: Send + Sync {
    fn classify(&self, description: &str) -> Result<ClassifierResponse, ClassifierError>;

    /// Short identifier used in logs and health output
    fn name(&self) -> &'static str;
}
