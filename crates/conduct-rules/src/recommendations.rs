//! Recommendations by Severity Band
//!
//! Fire once the severity is known. Level 0 (undetermined) gets none.

use rule_engine::{Bindings, Guard, Pattern, Rule};
use working_memory::{Fact, FactKind};

pub const LEVELS_1_2: &str = "recommend_levels_1_2";
pub const LEVELS_3_4: &str = "recommend_levels_3_4";
pub const LEVELS_5_6: &str = "recommend_levels_5_6";

pub const EDUCATIONAL: &str = "**Educational action:** A guidance conversation with the offender \
    is recommended to clarify the impact of their actions, even if unintentional.";
pub const MEDIATION: &str = "**Mediation:** If appropriate, mediation between the parties can be \
    considered to resolve misunderstandings.";
pub const MONITORING: &str = "**Monitoring:** Follow up on the behaviour to ensure the conduct is \
    not repeated or escalated.";

pub const FORMAL_REFERRAL: &str = "**Formal referral:** Register the occurrence with the Ombudsman \
    and/or Ethics Committee for formal analysis.";
pub const MANDATORY_TRAINING: &str = "**Mandatory training:** The offender should be directed to \
    mandatory courses and training on harassment, discrimination and respect in the workplace.";
pub const FORMAL_WARNING: &str = "**Formal warning:** Consider issuing a formal warning under the \
    applicable disciplinary regime.";
pub const VICTIM_SUPPORT: &str = "**Victim support:** Offer psychological support to the victim \
    and guidance on their rights and institutional procedures.";

pub const IMMEDIATE_ACTION: &str = "**Immediate action:** Ensure the victim's safety, which may \
    include temporarily removing the offender from their duties or from contact with the victim.";
pub const DISCIPLINARY_PROCESS: &str = "**Disciplinary process:** Immediately forward the \
    complaint for the opening of an administrative disciplinary process or equivalent.";
pub const FULL_VICTIM_SUPPORT: &str = "**Full victim support:** Proactively offer the victim all \
    necessary support, including psychological, legal and security assistance.";
/// Level 6 only
pub const EXTERNAL_AUTHORITIES: &str = "**External authorities:** Advise the victim to file a \
    police report and seek the police authorities, given the criminal nature of the conduct.";

fn band(levels: [u8; 2]) -> Pattern {
    Pattern::new(FactKind::Severity).with("level", Guard::one_of(levels))
}

fn recommend(texts: &[&str]) -> Vec<Fact> {
    texts.iter().map(|t| Fact::recommendation(*t)).collect()
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(LEVELS_1_2, |_| recommend(&[EDUCATIONAL, MEDIATION, MONITORING]))
            .with_salience(1)
            .when(band([1, 2])),
        Rule::new(LEVELS_3_4, |_| {
            recommend(&[FORMAL_REFERRAL, MANDATORY_TRAINING, FORMAL_WARNING, VICTIM_SUPPORT])
        })
        .with_salience(1)
        .when(band([3, 4])),
        Rule::new(LEVELS_5_6, recommend_levels_5_6)
            .with_salience(1)
            .when(band([5, 6])),
    ]
}

fn recommend_levels_5_6(bindings: &Bindings<'_>) -> Vec<Fact> {
    let mut facts = recommend(&[IMMEDIATE_ACTION, DISCIPLINARY_PROCESS, FULL_VICTIM_SUPPORT]);
    if let Some(Fact::Severity { level: 6, .. }) = bindings.fact(0) {
        facts.push(Fact::recommendation(EXTERNAL_AUTHORITIES));
    }
    facts
}
