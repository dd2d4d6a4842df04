//! Evaluation Sessions
//!
//! One session = one fresh fact store. The rule base is shared read-only
//! between sessions, so an `Evaluator` can serve concurrent requests.

use crate::error::TriageError;
use crate::input::EvaluationInput;
use crate::report::EvaluationReport;
use chrono::Utc;
use classifier::{normalize, Classifier, ClassifierOutcome};
use rule_engine::{EngineConfig, InferenceEngine, RuleBase};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use working_memory::Fact;

/// Runs evaluation sessions against a shared rule base
#[derive(Debug, Clone)]
pub struct Evaluator {
    rules: Arc<RuleBase>,
    config: EngineConfig,
}

impl Evaluator {
    pub fn new(rules: Arc<RuleBase>, config: EngineConfig) -> Self {
        Self { rules, config }
    }

    /// Evaluator over the standard conduct rule base
    pub fn with_config(config: EngineConfig) -> Result<Self, TriageError> {
        let rules = conduct_rules::rule_base()?;
        Ok(Self::new(Arc::new(rules), config))
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Validate, classify the description once, then run a session
    pub fn evaluate(
        &self,
        input: &EvaluationInput,
        classifier: &dyn Classifier,
    ) -> Result<EvaluationReport, TriageError> {
        let validated = input.validate()?;

        debug!("Classifying description with `{}`", classifier.name());
        let outcome = normalize(classifier.classify(&validated.description));
        self.run_session(validated.facts(), outcome)
    }

    /// Run a session from an already-resolved classifier outcome
    pub fn evaluate_with_outcome(
        &self,
        input: &EvaluationInput,
        outcome: ClassifierOutcome,
    ) -> Result<EvaluationReport, TriageError> {
        let validated = input.validate()?;
        self.run_session(validated.facts(), outcome)
    }

    fn run_session(
        &self,
        facts: Vec<Fact>,
        outcome: ClassifierOutcome,
    ) -> Result<EvaluationReport, TriageError> {
        let session_id = Uuid::new_v4();
        let evaluated_at = Utc::now();
        info!(
            "Session {} started: classifier succeeded={}, {} input facts",
            session_id,
            outcome.succeeded,
            facts.len()
        );

        let mut engine = InferenceEngine::new(Arc::clone(&self.rules), self.config);
        engine.declare(outcome.clone().into());
        for fact in facts {
            engine.declare(fact);
        }

        let summary = engine.run()?;
        let (store, firings) = engine.into_parts();
        let report =
            EvaluationReport::from_session(session_id, evaluated_at, outcome, store, firings, summary)?;

        info!(
            "Session {} finished: severity {} ({}), {} explanations, {} recommendations",
            session_id,
            report.severity.level,
            report.severity.description,
            report.explanations.len(),
            report.recommendations.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use classifier::{ClassifierError, ClassifierResponse, KeywordClassifier};
    use conduct_rules::{factors, recommendations};
    use proptest::prelude::*;
    use working_memory::{
        Context, FactKind, Frequency, HierarchicalRelation, History, Impact, Intention,
        NonVerbal, Origin,
    };

    struct Failing;

    impl Classifier for Failing {
        fn classify(&self, _: &str) -> Result<ClassifierResponse, ClassifierError> {
            Err(ClassifierError::Service("unavailable".into()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn evaluator() -> Evaluator {
        Evaluator::with_config(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_scenario_classified_with_factors() {
        let input = EvaluationInput {
            context: Context::FormalPublic.code().into(),
            impact: Impact::ConsiderableNegative.code().into(),
            ..EvaluationInput::new("He shouted direct insults at me during the meeting")
        };
        let outcome = ClassifierOutcome::suggested(4, vec!["direct insults".into()]);

        let report = evaluator().evaluate_with_outcome(&input, outcome).unwrap();

        assert_eq!(report.severity.level, 4);
        assert_eq!(report.severity.description, "Quite offensive");
        assert!(report.severity.determined);

        assert_eq!(report.explanations.ai.len(), 1);
        assert!(report.explanations.ai[0].contains("Base Level 4"));
        assert!(report.explanations.ai[0].contains("direct insults"));
        assert!(report.explanations.system.is_empty());
        assert_eq!(
            report.explanations.additional_factors,
            vec![factors::text::CONTEXT_FORMAL_PUBLIC, factors::text::IMPACT_CONSIDERABLE]
        );
        assert_eq!(
            report.recommendations,
            vec![
                recommendations::FORMAL_REFERRAL,
                recommendations::MANDATORY_TRAINING,
                recommendations::FORMAL_WARNING,
                recommendations::VICTIM_SUPPORT,
            ]
        );
    }

    #[test]
    fn test_scenario_classifier_failure_without_factors() {
        let report = evaluator()
            .evaluate(&EvaluationInput::new("something happened"), &Failing)
            .unwrap();

        assert_eq!(report.severity.level, 0);
        assert_eq!(report.severity.description, "Undetermined by AI");
        assert!(!report.severity.determined);
        assert!(!report.classifier.succeeded);
        assert_eq!(report.explanations.system.len(), 1);
        assert!(report.explanations.ai.is_empty());
        assert!(report.explanations.additional_factors.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_scenario_level_6_with_direct_superior() {
        let input = EvaluationInput {
            hierarchical_relation: HierarchicalRelation::DirectSuperior.code().into(),
            ..EvaluationInput::new("My manager hit me")
        };

        let report = evaluator()
            .evaluate_with_outcome(&input, ClassifierOutcome::suggested(6, vec![]))
            .unwrap();

        assert_eq!(report.severity.description, "Aggressive and physically violent");
        assert_eq!(report.explanations.additional_factors, vec![factors::text::HIERARCHY_SUPERIOR]);
        assert_eq!(report.recommendations.len(), 4);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r == recommendations::EXTERNAL_AUTHORITIES));
    }

    #[test]
    fn test_keyword_classifier_end_to_end() {
        let report = evaluator()
            .evaluate(
                &EvaluationInput::new("There were racist comments every week"),
                &KeywordClassifier::default(),
            )
            .unwrap();

        assert_eq!(report.severity.level, 5);
        assert_eq!(report.classifier.detected_keywords, vec!["racist comments"]);
    }

    #[test]
    fn test_audit_log_order_and_origin() {
        let input = EvaluationInput {
            intention: Intention::Intentional.code().into(),
            ..EvaluationInput::new("deliberate humiliation")
        };
        let report = evaluator()
            .evaluate_with_outcome(&input, ClassifierOutcome::suggested(2, vec![]))
            .unwrap();

        let entries = report.audit_log.entries();
        assert_eq!(entries[0].fact_type(), "ClassifierResult");
        assert_eq!(entries[1].fact_type(), "ConductDescription");
        assert_eq!(entries[2].fact_type(), "IntentionFact");
        assert!(entries[..3].iter().all(|e| e.origin == Origin::Asserted));
        assert!(entries[3..].iter().all(|e| matches!(e.origin, Origin::Derived { .. })));

        // Severity first (salience 20), then recommendations (1), then factors (0)
        let fired: Vec<_> = report.firings.iter().map(|f| f.rule).collect();
        assert_eq!(
            fired,
            vec![
                conduct_rules::severity::FROM_CLASSIFIER,
                recommendations::LEVELS_1_2,
                factors::INTENTION_INTENTIONAL,
            ]
        );
        assert_eq!(report.summary.firings, 3);
    }

    #[test]
    fn test_invalid_input_is_rejected_before_classifying() {
        let input = EvaluationInput {
            history: "Sometimes".into(),
            ..EvaluationInput::new("x")
        };
        let err = evaluator().evaluate(&input, &Failing).unwrap_err();
        assert!(matches!(err, TriageError::Input(InputError::UnknownOption(_))));
    }

    #[test]
    fn test_missing_severity_rules_violate_invariant() {
        let evaluator = Evaluator::new(
            Arc::new(RuleBase::new(vec![]).unwrap()),
            EngineConfig::default(),
        );
        let err = evaluator
            .evaluate_with_outcome(&EvaluationInput::new("x"), ClassifierOutcome::failed())
            .unwrap_err();
        assert!(matches!(err, TriageError::SeverityInvariant(0)));
    }

    fn code_or_na<T: Copy + 'static>(all: &'static [T], code: fn(&T) -> &'static str) -> impl Strategy<Value = String> {
        let codes: Vec<String> = std::iter::once("na".to_string())
            .chain(all.iter().map(|o| code(o).to_string()))
            .collect();
        proptest::sample::select(codes)
    }

    fn arb_input() -> impl Strategy<Value = EvaluationInput> {
        (
            code_or_na(Context::ALL, Context::code),
            code_or_na(History::ALL, History::code),
            code_or_na(Frequency::ALL, Frequency::code),
            code_or_na(Impact::ALL, Impact::code),
            code_or_na(NonVerbal::ALL, NonVerbal::code),
            code_or_na(Intention::ALL, Intention::code),
            code_or_na(HierarchicalRelation::ALL, HierarchicalRelation::code),
        )
            .prop_map(
                |(context, history, frequency, impact, non_verbal, intention, hierarchical_relation)| {
                    EvaluationInput {
                        description: "conduct".into(),
                        context,
                        history,
                        frequency,
                        impact,
                        non_verbal,
                        intention,
                        hierarchical_relation,
                    }
                },
            )
    }

    fn arb_outcome() -> impl Strategy<Value = ClassifierOutcome> {
        prop_oneof![
            Just(ClassifierOutcome::failed()),
            (1i64..=6).prop_map(|l| ClassifierOutcome::suggested(l, vec!["kw".into()])),
        ]
    }

    /// Selected codes that have a factor explanation
    fn explained_factors(input: &EvaluationInput) -> usize {
        let explained = [
            "Isolated with sexual connotation",
            "Formal/Public",
            "Recurrent",
            "Frequent",
            "Repetitive/Insistent",
            "Occasional",
            "Intense-negative",
            "Considerable-negative",
            "Aggravated",
            "Intentional",
            "Negligent",
            "Direct superior",
            "Indirect superior",
        ];
        [
            &input.context,
            &input.history,
            &input.frequency,
            &input.impact,
            &input.non_verbal,
            &input.intention,
            &input.hierarchical_relation,
        ]
        .iter()
        .filter(|code| explained.contains(&code.as_str()))
        .count()
    }

    proptest! {
        #[test]
        fn prop_exactly_one_severity(input in arb_input(), outcome in arb_outcome()) {
            let expected = outcome.suggested_level.unwrap_or(0);
            let report = evaluator().evaluate_with_outcome(&input, outcome).unwrap();

            prop_assert_eq!(report.severity.level, expected);
            prop_assert_eq!(report.audit_log.of_kind(FactKind::Severity).count(), 1);
        }

        #[test]
        fn prop_sessions_are_idempotent(input in arb_input(), outcome in arb_outcome()) {
            let evaluator = evaluator();
            let first = evaluator.evaluate_with_outcome(&input, outcome.clone()).unwrap();
            let second = evaluator.evaluate_with_outcome(&input, outcome).unwrap();

            prop_assert_ne!(first.session_id, second.session_id);
            prop_assert_eq!(first.severity, second.severity);
            prop_assert_eq!(first.explanations, second.explanations);
            prop_assert_eq!(first.recommendations, second.recommendations);
            prop_assert_eq!(first.firings, second.firings);
        }

        #[test]
        fn prop_every_factor_is_explained(input in arb_input(), outcome in arb_outcome()) {
            let expected = explained_factors(&input);
            let report = evaluator().evaluate_with_outcome(&input, outcome).unwrap();
            prop_assert_eq!(report.explanations.additional_factors.len(), expected);
        }
    }
}
