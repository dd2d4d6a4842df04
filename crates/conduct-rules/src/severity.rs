//! Base Severity Derivation
//!
//! Exactly one of two mutually exclusive rules establishes the session's
//! `Severity` fact. Both are guarded by the absence of any severity.

use rule_engine::{Bindings, Guard, Pattern, Rule};
use working_memory::{
    ExplanationSource, Fact, FactKind, MAX_SEVERITY_LEVEL, MIN_SEVERITY_LEVEL,
};

/// Level used when the classifier could not suggest one
pub const UNDETERMINED_LEVEL: u8 = 0;
pub const UNDETERMINED_DESCRIPTION: &str = "Undetermined by AI";

pub const FROM_CLASSIFIER: &str = "severity_from_classifier";
pub const FALLBACK: &str = "severity_fallback";

/// Explanation declared with the undetermined fallback
pub const UNDETERMINED_EXPLANATION: &str = "The AI could not determine a clear severity level \
    from the description. The evaluation will rely only on the additional factors selected.";

/// Description of a severity level
pub fn describe(level: u8) -> &'static str {
    match level {
        1 => "Generally non-offensive",
        2 => "Embarrassing and mildly offensive",
        3 => "Offensive",
        4 => "Quite offensive",
        5 => "Aggressive, not physically violent",
        6 => "Aggressive and physically violent",
        _ => "Unknown level",
    }
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(FROM_CLASSIFIER, severity_from_classifier)
            .with_salience(20)
            .when(
                Pattern::new(FactKind::ClassifierResult)
                    .with("succeeded", Guard::equals(true))
                    .with(
                        "suggested_level",
                        Guard::in_range(
                            i64::from(MIN_SEVERITY_LEVEL),
                            i64::from(MAX_SEVERITY_LEVEL),
                        ),
                    ),
            )
            .unless(Pattern::new(FactKind::Severity)),
        Rule::new(FALLBACK, severity_fallback)
            .with_salience(5)
            .when(Pattern::new(FactKind::ClassifierResult).with("succeeded", Guard::equals(false)))
            .unless(Pattern::new(FactKind::Severity)),
    ]
}

fn severity_from_classifier(bindings: &Bindings<'_>) -> Vec<Fact> {
    let Some(Fact::ClassifierResult {
        suggested_level: Some(level),
        detected_keywords,
        ..
    }) = bindings.fact(0)
    else {
        return Vec::new();
    };

    let description = describe(*level);
    let keywords = if detected_keywords.is_empty() {
        "No specific keyword was detected, but the contextual analysis suggested this level."
            .to_string()
    } else {
        format!("Detected keywords: {}.", detected_keywords.join(", "))
    };

    vec![
        Fact::severity(*level, description),
        Fact::explanation(
            format!(
                "The AI analysis suggests a **Base Level {} ({})** for the described conduct. {}",
                level, description, keywords
            ),
            ExplanationSource::Ai,
        ),
    ]
}

fn severity_fallback(_: &Bindings<'_>) -> Vec<Fact> {
    vec![
        Fact::severity(UNDETERMINED_LEVEL, UNDETERMINED_DESCRIPTION),
        Fact::explanation(UNDETERMINED_EXPLANATION, ExplanationSource::System),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_engine::{EngineConfig, InferenceEngine, RuleBase};
    use std::sync::Arc;

    fn run(result: Fact) -> InferenceEngine {
        let rules = RuleBase::new(rules()).unwrap();
        let mut engine = InferenceEngine::new(Arc::new(rules), EngineConfig::default());
        engine.declare(result);
        engine.run().unwrap();
        engine
    }

    fn severities(engine: &InferenceEngine) -> Vec<Fact> {
        engine
            .store()
            .of_kind(FactKind::Severity)
            .map(|(_, f)| f.clone())
            .collect()
    }

    #[test]
    fn test_lookup_table() {
        assert_eq!(describe(1), "Generally non-offensive");
        assert_eq!(describe(4), "Quite offensive");
        assert_eq!(describe(6), "Aggressive and physically violent");
        assert_eq!(describe(0), "Unknown level");
        assert_eq!(describe(7), "Unknown level");
    }

    #[test]
    fn test_classifier_level_passes_through() {
        let engine = run(Fact::ClassifierResult {
            suggested_level: Some(4),
            detected_keywords: vec!["direct insults".into()],
            succeeded: true,
        });

        assert_eq!(severities(&engine), vec![Fact::severity(4, "Quite offensive")]);
        let explanation = engine
            .store()
            .of_kind(FactKind::Explanation)
            .map(|(_, f)| f.clone())
            .next()
            .unwrap();
        match explanation {
            Fact::Explanation { text, source } => {
                assert_eq!(source, ExplanationSource::Ai);
                assert!(text.contains("Base Level 4 (Quite offensive)"));
                assert!(text.contains("Detected keywords: direct insults."));
            }
            other => panic!("unexpected fact {other}"),
        }
    }

    #[test]
    fn test_no_keywords_note() {
        let engine = run(Fact::ClassifierResult {
            suggested_level: Some(2),
            detected_keywords: vec![],
            succeeded: true,
        });

        let has_note = engine.store().exists(FactKind::Explanation, |f| {
            matches!(f, Fact::Explanation { text, .. } if text.contains("No specific keyword"))
        });
        assert!(has_note);
    }

    #[test]
    fn test_failure_falls_back_to_undetermined() {
        let engine = run(Fact::ClassifierResult {
            suggested_level: None,
            detected_keywords: vec![],
            succeeded: false,
        });

        assert_eq!(severities(&engine), vec![Fact::severity(0, UNDETERMINED_DESCRIPTION)]);
        assert!(engine.store().exists(FactKind::Explanation, |f| {
            matches!(f, Fact::Explanation { source: ExplanationSource::System, .. })
        }));
    }

    #[test]
    fn test_out_of_range_level_is_not_used() {
        // Boundary normalization should prevent this; the guard still rejects it
        let engine = run(Fact::ClassifierResult {
            suggested_level: Some(9),
            detected_keywords: vec![],
            succeeded: true,
        });
        assert!(severities(&engine).is_empty());
    }

    #[test]
    fn test_existing_severity_blocks_both_rules() {
        let rules = RuleBase::new(rules()).unwrap();
        let mut engine = InferenceEngine::new(Arc::new(rules), EngineConfig::default());
        engine.declare(Fact::severity(5, describe(5)));
        engine.declare(Fact::ClassifierResult {
            suggested_level: Some(2),
            detected_keywords: vec![],
            succeeded: true,
        });

        let summary = engine.run().unwrap();
        assert_eq!(summary.firings, 0);
        assert_eq!(severities(&engine), vec![Fact::severity(5, describe(5))]);
    }
}
