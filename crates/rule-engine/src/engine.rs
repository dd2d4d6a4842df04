//! Inference Loop

use crate::agenda::Agenda;
use crate::rule::{Bindings, RuleBase};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};
use working_memory::{Declaration, Fact, FactId, FactStore, Origin};

/// Errors during inference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The loop did not reach a fixpoint within its firing bound
    #[error("rule `{rule}` would exceed the firing limit of {limit}")]
    FiringLimitExceeded { rule: &'static str, limit: usize },
}

/// Inference loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Firing bound as a multiple of the rule count
    pub firing_limit_factor: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            firing_limit_factor: 4,
        }
    }
}

impl EngineConfig {
    /// Maximum firings allowed for a rule base of `rule_count` rules
    pub fn firing_limit(&self, rule_count: usize) -> usize {
        rule_count.max(1).saturating_mul(self.firing_limit_factor)
    }
}

/// One executed rule instantiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Firing {
    /// Agenda cycle the firing happened in (1-based)
    pub cycle: usize,
    pub rule: &'static str,
    pub salience: i32,
    /// Facts that satisfied the rule's positive conditions
    pub binding: Vec<FactId>,
    /// Facts the action declared (duplicates excluded)
    pub declared: Vec<FactId>,
}

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Agenda rebuilds, including the final empty one
    pub cycles: usize,
    pub firings: usize,
    pub derived_facts: usize,
}

/// Forward-chaining engine for one session
///
/// Owns the session's fact store; the rule base is shared.
pub struct InferenceEngine {
    rules: Arc<RuleBase>,
    config: EngineConfig,
    store: FactStore,
    /// (rule index, binding) pairs that already fired
    fired: HashSet<(usize, Vec<FactId>)>,
    trace: Vec<Firing>,
}

impl InferenceEngine {
    /// Create an engine with an empty store
    pub fn new(rules: Arc<RuleBase>, config: EngineConfig) -> Self {
        Self {
            rules,
            config,
            store: FactStore::new(),
            fired: HashSet::new(),
            trace: Vec::new(),
        }
    }

    /// Declare a caller-asserted fact
    pub fn declare(&mut self, fact: Fact) -> FactId {
        self.store.declare(fact)
    }

    /// Run to fixpoint
    ///
    /// Each cycle rebuilds the agenda from the current store, fires the
    /// single best activation and records it as fired.
    pub fn run(&mut self) -> Result<RunSummary, EngineError> {
        let rules = Arc::clone(&self.rules);
        let limit = self.config.firing_limit(rules.len());
        let mut summary = RunSummary::default();

        info!("Running inference: {} rules, {} facts", rules.len(), self.store.len());

        loop {
            summary.cycles += 1;

            let mut agenda = Agenda::build(&rules, &self.store, &self.fired);
            let Some(activation) = agenda.pop() else {
                break;
            };
            let rule = &rules.rules()[activation.rule];

            if summary.firings >= limit {
                error!(
                    "Firing limit {} reached; next activation was `{}`",
                    limit,
                    rule.name()
                );
                return Err(EngineError::FiringLimitExceeded {
                    rule: rule.name(),
                    limit,
                });
            }

            let produced = {
                let bindings = Bindings::resolve(&self.store, &activation.binding);
                rule.fire(&bindings)
            };

            let mut declared = Vec::with_capacity(produced.len());
            for fact in produced {
                let origin = Origin::Derived {
                    rule: rule.name().to_string(),
                };
                match self.store.declare_with_origin(fact, origin) {
                    Declaration::New(id) => declared.push(id),
                    Declaration::Duplicate(id) => {
                        debug!("`{}` re-derived existing fact {}", rule.name(), id);
                    }
                }
            }

            debug!(
                "Cycle {}: fired `{}` (salience {}) on {:?}, declared {:?}",
                summary.cycles,
                rule.name(),
                activation.salience,
                activation.binding,
                declared
            );

            summary.firings += 1;
            summary.derived_facts += declared.len();
            self.trace.push(Firing {
                cycle: summary.cycles,
                rule: rule.name(),
                salience: activation.salience,
                binding: activation.binding.clone(),
                declared,
            });
            self.fired.insert((activation.rule, activation.binding));
        }

        info!(
            "Fixpoint after {} cycles: {} firings, {} derived facts",
            summary.cycles, summary.firings, summary.derived_facts
        );
        Ok(summary)
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }

    pub fn trace(&self) -> &[Firing] {
        &self.trace
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Consume the engine, keeping the store and the firing trace
    pub fn into_parts(self) -> (FactStore, Vec<Firing>) {
        (self.store, self.trace)
    }
}
