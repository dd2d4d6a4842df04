//! Categorical Conduct Factors
//!
//! Each factor is a closed option set with a stable wire code and a
//! human-readable label. The `"na"` sentinel is not an option: it only
//! exists at the input boundary and means "do not declare this fact".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reserved input code meaning "not applicable / not informed"
pub const NOT_APPLICABLE: &str = "na";

/// A categorical input code outside its option set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} option `{value}` is not recognised")]
pub struct UnknownOption {
    /// Input field the code was given for
    pub field: &'static str,
    /// The rejected code
    pub value: String,
}

/// One selectable option (code + label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// A complete option set for one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    pub field: &'static str,
    pub options: Vec<CategoricalOption>,
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            /// Every option, in presentation order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Input field this option set belongs to
            pub const FIELD: &'static str = $field;

            /// Stable wire code
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Human-readable label
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Parse a wire code
            pub fn from_code(code: &str) -> Result<Self, UnknownOption> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(UnknownOption {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }

            /// Option set description for form rendering
            pub fn option_set() -> OptionSet {
                OptionSet {
                    field: $field,
                    options: Self::ALL
                        .iter()
                        .map(|o| CategoricalOption { code: o.code(), label: o.label() })
                        .collect(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s)
            }
        }
    };
}

categorical! {
    /// Setting in which the conduct happened
    Context, field = "context" {
        FormalPublic => "Formal/Public",
            "Formal (meeting, presentation) and public (affecting more people)";
        FormalPrivate => "Formal/Private",
            "Formal (meeting, presentation) and private (specific individuals only)";
        InformalPublic => "Informal/Public",
            "Informal (social event, casual conversation) and public (affecting more people)";
        InformalPrivate => "Informal/Private",
            "Informal (social event, casual conversation) and private (specific individuals only)";
        IsolatedSexualConnotation => "Isolated with sexual connotation",
            "Closed or isolated place, with a sexual connotation (increases vulnerability)";
    }
}

categorical! {
    /// Offender's history of inappropriate conduct
    History, field = "history" {
        Primary => "Primary", "No previous history of inappropriate conduct";
        Recurrent => "Recurrent", "History of similar or related conduct";
        Frequent => "Frequent", "Multiple recurrences indicating a behavioural pattern";
    }
}

categorical! {
    /// How often the conduct happens
    Frequency, field = "frequency" {
        Isolated => "Isolated", "Single incident with no known repetition";
        Occasional => "Occasional", "Happens sporadically, but more than once";
        RepetitiveInsistent => "Repetitive/Insistent", "Happens frequently";
    }
}

categorical! {
    /// Impact on the victim
    Impact, field = "impact" {
        NotSignificant => "Not-significant", "No further repercussions for the victim";
        ConsiderableNegative => "Considerable-negative",
            "Short-term, not very serious consequences for the victim";
        IntenseNegative => "Intense-negative",
            "Medium and long-term consequences, causing suffering";
    }
}

categorical! {
    /// Non-verbal signals accompanying the conduct
    NonVerbal, field = "non_verbal" {
        Neutral => "Neutral", "No significant non-verbal signals";
        Aggravated => "Aggravated", "Non-verbal signals that intensify negativity (threat, contempt)";
    }
}

categorical! {
    /// Perceived intention of the offender
    Intention, field = "intention" {
        Accidental => "Accidental", "No clear intention of causing harm";
        Negligent => "Negligent", "Lack of consideration for the consequences";
        Intentional => "Intentional", "Evident aim of causing harm or discomfort";
    }
}

categorical! {
    /// Hierarchical relation between offender and victim
    HierarchicalRelation, field = "hierarchical_relation" {
        SameLevel => "Same level or not relevant", "Colleagues or no direct subordination";
        DirectSuperior => "Direct superior", "The offender is the victim's direct superior";
        IndirectSuperior => "Indirect superior",
            "The offender holds a superior position, but not a direct one";
    }
}

/// Parse an optional categorical input; `"na"` or an empty code yields `None`
pub fn parse_optional<T>(code: &str) -> Result<Option<T>, UnknownOption>
where
    T: FromStr<Err = UnknownOption>,
{
    let code = code.trim();
    if code.is_empty() || code == NOT_APPLICABLE {
        return Ok(None);
    }
    code.parse().map(Some)
}

/// Every categorical option set, in form order
pub fn all_option_sets() -> Vec<OptionSet> {
    vec![
        Context::option_set(),
        History::option_set(),
        Frequency::option_set(),
        Impact::option_set(),
        NonVerbal::option_set(),
        Intention::option_set(),
        HierarchicalRelation::option_set(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for context in Context::ALL {
            assert_eq!(Context::from_code(context.code()), Ok(*context));
        }
        assert_eq!(
            "Direct superior".parse::<HierarchicalRelation>(),
            Ok(HierarchicalRelation::DirectSuperior)
        );
    }

    #[test]
    fn test_unknown_code_names_field() {
        let err = Impact::from_code("Catastrophic").unwrap_err();
        assert_eq!(err.field, "impact");
        assert_eq!(err.value, "Catastrophic");
        assert_eq!(err.to_string(), "impact option `Catastrophic` is not recognised");
    }

    #[test]
    fn test_not_applicable_sentinel() {
        assert_eq!(parse_optional::<Frequency>("na"), Ok(None));
        assert_eq!(parse_optional::<Frequency>(""), Ok(None));
        assert_eq!(
            parse_optional::<Frequency>("Occasional"),
            Ok(Some(Frequency::Occasional))
        );
        assert!(parse_optional::<Frequency>("Daily").is_err());
    }

    #[test]
    fn test_option_set_sizes() {
        let sizes: Vec<_> = all_option_sets().iter().map(|s| s.options.len()).collect();
        assert_eq!(sizes, vec![5, 3, 3, 3, 2, 3, 3]);
    }

    #[test]
    fn test_serde_uses_wire_code() {
        let json = serde_json::to_string(&Impact::ConsiderableNegative).unwrap();
        assert_eq!(json, "\"Considerable-negative\"");
    }
}
