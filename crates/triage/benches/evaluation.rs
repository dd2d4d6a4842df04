use classifier::{ClassifierOutcome, KeywordClassifier};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rule_engine::EngineConfig;
use triage::{EvaluationInput, Evaluator};

fn scenario() -> EvaluationInput {
    EvaluationInput {
        context: "Formal/Public".into(),
        history: "Recurrent".into(),
        frequency: "Repetitive/Insistent".into(),
        impact: "Intense-negative".into(),
        non_verbal: "Aggravated".into(),
        intention: "Intentional".into(),
        hierarchical_relation: "Direct superior".into(),
        ..EvaluationInput::new("Repeated direct insults and malicious humiliation in meetings")
    }
}

fn bench_evaluation(c: &mut Criterion) {
    let evaluator = Evaluator::with_config(EngineConfig::default()).expect("rule base");
    let input = scenario();
    let classifier = KeywordClassifier::default();

    c.bench_function("session_with_outcome", |b| {
        b.iter(|| {
            let outcome = ClassifierOutcome::suggested(4, vec!["direct insults".into()]);
            evaluator.evaluate_with_outcome(black_box(&input), outcome)
        })
    });

    c.bench_function("session_with_keyword_classifier", |b| {
        b.iter(|| evaluator.evaluate(black_box(&input), &classifier))
    });
}

criterion_group!(benches, bench_evaluation);
criterion_main!(benches);
