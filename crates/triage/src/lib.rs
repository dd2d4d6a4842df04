//! Conduct Triage Sessions
//!
//! Validates an evaluation request, resolves the classifier once, runs the
//! conduct rule base to fixpoint on a fresh fact store and reports:
//! - The single final severity
//! - Explanations grouped by source
//! - Recommendations, the audit log and the firing trace

mod error;
mod input;
mod report;
mod session;

pub use error::{InputError, TriageError};
pub use input::{EvaluationInput, ValidatedInput};
pub use report::{EvaluationReport, Explanations, SeverityView};
pub use session::Evaluator;
