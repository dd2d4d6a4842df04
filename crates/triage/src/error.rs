//! Triage Error Types

use rule_engine::{EngineError, RuleError};
use thiserror::Error;
use working_memory::UnknownOption;

/// Rejected evaluation input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Conduct description is required")]
    EmptyDescription,

    #[error(transparent)]
    UnknownOption(#[from] UnknownOption),
}

/// Errors while running an evaluation session
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Rule base is invalid: {0}")]
    RuleBase(#[from] RuleError),

    #[error("Inference failed: {0}")]
    Engine(#[from] EngineError),

    /// The run did not end with exactly one severity
    #[error("Expected exactly one severity after inference, found {0}")]
    SeverityInvariant(usize),
}
