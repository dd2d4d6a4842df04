//! Evaluation Input Validation

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use tracing::warn;
use working_memory::{
    parse_optional, Context, Fact, Frequency, HierarchicalRelation, History, Impact, Intention,
    NonVerbal, UnknownOption, NOT_APPLICABLE,
};

fn not_applicable() -> String {
    NOT_APPLICABLE.to_string()
}

/// Raw evaluation request
///
/// Categorical fields carry wire codes; `"na"` (the default) means the
/// factor was not informed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub description: String,
    #[serde(default = "not_applicable")]
    pub context: String,
    #[serde(default = "not_applicable")]
    pub history: String,
    #[serde(default = "not_applicable")]
    pub frequency: String,
    #[serde(default = "not_applicable")]
    pub impact: String,
    #[serde(default = "not_applicable")]
    pub non_verbal: String,
    #[serde(default = "not_applicable")]
    pub intention: String,
    #[serde(default = "not_applicable")]
    pub hierarchical_relation: String,
}

impl Default for EvaluationInput {
    fn default() -> Self {
        Self {
            description: String::new(),
            context: not_applicable(),
            history: not_applicable(),
            frequency: not_applicable(),
            impact: not_applicable(),
            non_verbal: not_applicable(),
            intention: not_applicable(),
            hierarchical_relation: not_applicable(),
        }
    }
}

impl EvaluationInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Parse every field, rejecting the first bad one
    pub fn validate(&self) -> Result<ValidatedInput, InputError> {
        let description = self.description.trim();
        if description.is_empty() {
            warn!("Rejected evaluation input: empty description");
            return Err(InputError::EmptyDescription);
        }

        self.parse_factors(description).map_err(|e| {
            warn!("Rejected evaluation input: {}", e);
            InputError::from(e)
        })
    }

    fn parse_factors(&self, description: &str) -> Result<ValidatedInput, UnknownOption> {
        Ok(ValidatedInput {
            description: description.to_string(),
            context: parse_optional(&self.context)?,
            history: parse_optional(&self.history)?,
            frequency: parse_optional(&self.frequency)?,
            impact: parse_optional(&self.impact)?,
            non_verbal: parse_optional(&self.non_verbal)?,
            intention: parse_optional(&self.intention)?,
            hierarchical_relation: parse_optional(&self.hierarchical_relation)?,
        })
    }
}

/// Evaluation input after parsing; `None` means not informed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub description: String,
    pub context: Option<Context>,
    pub history: Option<History>,
    pub frequency: Option<Frequency>,
    pub impact: Option<Impact>,
    pub non_verbal: Option<NonVerbal>,
    pub intention: Option<Intention>,
    pub hierarchical_relation: Option<HierarchicalRelation>,
}

impl ValidatedInput {
    /// Description and informed factors, in declaration order
    pub fn facts(&self) -> Vec<Fact> {
        let factors = [
            self.context.map(|context| Fact::Context { context }),
            self.history.map(|history| Fact::History { history }),
            self.frequency.map(|frequency| Fact::Frequency { frequency }),
            self.impact.map(|impact| Fact::Impact { impact }),
            self.non_verbal.map(|non_verbal| Fact::NonVerbal { non_verbal }),
            self.intention.map(|intention| Fact::Intention { intention }),
            self.hierarchical_relation
                .map(|relation| Fact::HierarchicalRelation { relation }),
        ];

        std::iter::once(Fact::ConductDescription {
            text: self.description.clone(),
        })
        .chain(factors.into_iter().flatten())
        .collect()
    }
}
