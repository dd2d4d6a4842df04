//! Production Rule Engine
//!
//! Forward-chaining inference over a [`working_memory::FactStore`]:
//! - Named field guards and fact patterns
//! - Statically declared rules with salience
//! - Agenda with salience / recency conflict resolution
//! - Fixpoint inference loop with refractoriness and a firing bound

mod agenda;
mod engine;
mod guard;
mod rule;

pub use agenda::{Activation, Agenda};
pub use engine::{EngineConfig, EngineError, Firing, InferenceEngine, RunSummary};
pub use guard::{FieldGuard, Guard, Literal};
pub use rule::{Action, Bindings, Condition, Pattern, Rule, RuleBase, RuleBaseBuilder, RuleError};
