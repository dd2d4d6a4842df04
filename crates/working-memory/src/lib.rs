//! Working Memory
//!
//! Facts declared during one evaluation session:
//! - Typed, immutable fact records (one tag per fact kind)
//! - Closed categorical option sets for the conduct factors
//! - Append-only fact store with per-kind existence index
//! - Ordered session log for audit output

mod categorical;
mod fact;
mod log;
mod store;

pub use categorical::{
    all_option_sets, parse_optional, CategoricalOption, Context, Frequency, HierarchicalRelation,
    History, Impact, Intention, NonVerbal, OptionSet, UnknownOption, NOT_APPLICABLE,
};
pub use fact::{
    ExplanationSource, Fact, FactId, FactKind, FieldValue, MAX_SEVERITY_LEVEL, MIN_SEVERITY_LEVEL,
};
pub use log::{LogEntry, Origin, SessionLog};
pub use store::{Declaration, FactStore};
