//! Additional Factor Explanations
//!
//! One ungraded rule per categorical value of interest. Each declares a
//! single `AdditionalFactor` explanation and never touches the severity.

use rule_engine::{Guard, Pattern, Rule};
use working_memory::{
    Context, ExplanationSource, Fact, FactKind, Frequency, History, Impact, Intention, NonVerbal,
};

pub const CONTEXT_SEXUAL_CONNOTATION: &str = "explain_context_sexual_connotation";
pub const CONTEXT_FORMAL_PUBLIC: &str = "explain_context_formal_public";
pub const HISTORY_REPEATED: &str = "explain_history_repeated";
pub const FREQUENCY_REPETITIVE: &str = "explain_frequency_repetitive";
pub const FREQUENCY_OCCASIONAL: &str = "explain_frequency_occasional";
pub const IMPACT_INTENSE: &str = "explain_impact_intense";
pub const IMPACT_CONSIDERABLE: &str = "explain_impact_considerable";
pub const NON_VERBAL_AGGRAVATED: &str = "explain_non_verbal_aggravated";
pub const INTENTION_INTENTIONAL: &str = "explain_intention_intentional";
pub const INTENTION_NEGLIGENT: &str = "explain_intention_negligent";
pub const HIERARCHY_SUPERIOR: &str = "explain_hierarchy_superior";

/// Explanation texts, one per factor rule
pub mod text {
    pub const CONTEXT_SEXUAL_CONNOTATION: &str = "**Aggravating factor (Context):** The conduct \
        took place in an isolated location with a sexual connotation, which increases the \
        victim's sense of vulnerability.";
    pub const CONTEXT_FORMAL_PUBLIC: &str = "**Contextual factor:** The conduct took place in a \
        formal and public setting. Depending on the act, this can amplify the impact and the \
        embarrassment, and it sets a negative example.";
    pub const HISTORY_REPEATED: &str = "**Aggravating factor (History):** The offender has a \
        history of inappropriate conduct, which suggests a behavioural pattern and increases \
        the seriousness of the current situation.";
    pub const FREQUENCY_REPETITIVE: &str = "**Aggravating factor (Frequency):** The conduct is \
        repetitive and/or insistent, which can create a continuously hostile work environment \
        and is treated more seriously.";
    pub const FREQUENCY_OCCASIONAL: &str = "**Attention factor (Frequency):** The conduct \
        happened sporadically (more than once), indicating it was not an entirely isolated \
        event.";
    pub const IMPACT_INTENSE: &str = "**Aggravating factor (Impact):** The conduct had an \
        intense negative impact on the victim, causing medium to long-term suffering, which is \
        a strong indicator of severity.";
    pub const IMPACT_CONSIDERABLE: &str = "**Attention factor (Impact):** The conduct caused \
        short-term, not very serious consequences for the victim, but still had a considerable \
        negative impact.";
    pub const NON_VERBAL_AGGRAVATED: &str = "**Aggravating factor (Non-verbal signals):** The \
        conduct was accompanied by non-verbal signals (body language, expressions) that \
        intensified its negativity, suggesting threat or contempt.";
    pub const INTENTION_INTENTIONAL: &str = "**Aggravating factor (Intention):** The conduct was \
        perceived as intentional, with the clear aim of causing harm or discomfort, which makes \
        it more serious than a misunderstanding.";
    pub const INTENTION_NEGLIGENT: &str = "**Attention factor (Intention):** The conduct was \
        perceived as negligent, indicating a lack of consideration for the consequences the \
        act could have on the victim.";
    pub const HIERARCHY_SUPERIOR: &str = "**Aggravating factor (Hierarchy):** The offender holds \
        a position of hierarchical superiority over the victim. This power dynamic intensifies \
        the impact of the conduct and makes it harder for the victim to defend themselves.";
}

fn factor(text: &str) -> Vec<Fact> {
    vec![Fact::explanation(text, ExplanationSource::AdditionalFactor)]
}

fn pattern(kind: FactKind, field: &'static str, guard: Guard) -> Pattern {
    Pattern::new(kind).with(field, guard)
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(CONTEXT_SEXUAL_CONNOTATION, |_| factor(text::CONTEXT_SEXUAL_CONNOTATION)).when(
            pattern(
                FactKind::Context,
                "context",
                Guard::equals(Context::IsolatedSexualConnotation.code()),
            ),
        ),
        Rule::new(CONTEXT_FORMAL_PUBLIC, |_| factor(text::CONTEXT_FORMAL_PUBLIC)).when(pattern(
            FactKind::Context,
            "context",
            Guard::equals(Context::FormalPublic.code()),
        )),
        Rule::new(HISTORY_REPEATED, |_| factor(text::HISTORY_REPEATED)).when(pattern(
            FactKind::History,
            "history",
            Guard::one_of([History::Recurrent.code(), History::Frequent.code()]),
        )),
        Rule::new(FREQUENCY_REPETITIVE, |_| factor(text::FREQUENCY_REPETITIVE)).when(pattern(
            FactKind::Frequency,
            "frequency",
            Guard::equals(Frequency::RepetitiveInsistent.code()),
        )),
        Rule::new(FREQUENCY_OCCASIONAL, |_| factor(text::FREQUENCY_OCCASIONAL)).when(pattern(
            FactKind::Frequency,
            "frequency",
            Guard::equals(Frequency::Occasional.code()),
        )),
        Rule::new(IMPACT_INTENSE, |_| factor(text::IMPACT_INTENSE)).when(pattern(
            FactKind::Impact,
            "impact",
            Guard::equals(Impact::IntenseNegative.code()),
        )),
        Rule::new(IMPACT_CONSIDERABLE, |_| factor(text::IMPACT_CONSIDERABLE)).when(pattern(
            FactKind::Impact,
            "impact",
            Guard::equals(Impact::ConsiderableNegative.code()),
        )),
        Rule::new(NON_VERBAL_AGGRAVATED, |_| factor(text::NON_VERBAL_AGGRAVATED)).when(pattern(
            FactKind::NonVerbal,
            "non_verbal",
            Guard::equals(NonVerbal::Aggravated.code()),
        )),
        Rule::new(INTENTION_INTENTIONAL, |_| factor(text::INTENTION_INTENTIONAL)).when(pattern(
            FactKind::Intention,
            "intention",
            Guard::equals(Intention::Intentional.code()),
        )),
        Rule::new(INTENTION_NEGLIGENT, |_| factor(text::INTENTION_NEGLIGENT)).when(pattern(
            FactKind::Intention,
            "intention",
            Guard::equals(Intention::Negligent.code()),
        )),
        Rule::new(HIERARCHY_SUPERIOR, |_| factor(text::HIERARCHY_SUPERIOR)).when(pattern(
            FactKind::HierarchicalRelation,
            "relation",
            Guard::contains("superior"),
        )),
    ]
}
