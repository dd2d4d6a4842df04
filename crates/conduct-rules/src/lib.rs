//! Conduct Severity Rule Set
//!
//! Production rules for workplace-conduct triage:
//! - Base severity from the classifier result, or an undetermined fallback
//! - Explanations for aggravating and attenuating factors
//! - Recommendations keyed off the final severity level

pub mod factors;
pub mod recommendations;
pub mod severity;

use rule_engine::{RuleBase, RuleError};
use tracing::debug;

pub use severity::{describe, UNDETERMINED_DESCRIPTION, UNDETERMINED_LEVEL};

/// Build the complete conduct rule base
pub fn rule_base() -> Result<RuleBase, RuleError> {
    let rules = RuleBase::builder()
        .rules(severity::rules())
        .rules(factors::rules())
        .rules(recommendations::rules())
        .build()?;

    debug!("Conduct rule base built with {} rules", rules.len());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_base_is_valid() {
        let rules = rule_base().unwrap();
        assert_eq!(rules.len(), 2 + 11 + 3);
        assert!(rules.get(severity::FROM_CLASSIFIER).is_some());
        assert!(rules.get(factors::HIERARCHY_SUPERIOR).is_some());
        assert!(rules.get(recommendations::LEVELS_5_6).is_some());
    }
}
