//! Field Guards
//!
//! Guards are named predicates over a single fact field. They are plain
//! data rather than closures so a rule base can be listed, validated and
//! tested guard by guard.

use std::fmt;
use working_memory::FieldValue;

/// Literal value a guard compares against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl Literal {
    fn matches(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Literal::Int(expected), FieldValue::Int(actual)) => *expected == actual,
            (Literal::Text(expected), FieldValue::Text(actual)) => expected == actual,
            (Literal::Bool(expected), FieldValue::Bool(actual)) => *expected == actual,
            _ => false,
        }
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u8> for Literal {
    fn from(value: u8) -> Self {
        Literal::Int(i64::from(value))
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Text(s) => write!(f, "{:?}", s),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Predicate over one field value
///
/// Every guard requires the field to be present; an absent optional field
/// fails even the wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Any present value
    Any,
    /// Equal to a literal
    Equals(Literal),
    /// Equal to one of several literals
    OneOf(Vec<Literal>),
    /// Text contains the substring, or a text list contains the item
    Contains(String),
    /// Integer within `min..=max`
    InRange { min: i64, max: i64 },
}

impl Guard {
    pub fn equals(value: impl Into<Literal>) -> Self {
        Guard::Equals(value.into())
    }

    pub fn one_of<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Literal>,
    {
        Guard::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        Guard::Contains(needle.into())
    }

    pub fn in_range(min: i64, max: i64) -> Self {
        Guard::InRange { min, max }
    }

    /// Evaluate the guard against a field value
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        if value == FieldValue::Missing {
            return false;
        }

        match self {
            Guard::Any => true,
            Guard::Equals(literal) => literal.matches(value),
            Guard::OneOf(literals) => literals.iter().any(|l| l.matches(value)),
            Guard::Contains(needle) => match value {
                FieldValue::Text(text) => text.contains(needle.as_str()),
                FieldValue::TextList(items) => items.iter().any(|item| item == needle),
                _ => false,
            },
            Guard::InRange { min, max } => match value {
                FieldValue::Int(n) => (*min..=*max).contains(&n),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Any => f.write_str("*"),
            Guard::Equals(literal) => write!(f, "== {}", literal),
            Guard::OneOf(literals) => {
                f.write_str("in [")?;
                for (i, literal) in literals.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", literal)?;
                }
                f.write_str("]")
            }
            Guard::Contains(needle) => write!(f, "contains {:?}", needle),
            Guard::InRange { min, max } => write!(f, "in {}..={}", min, max),
        }
    }
}

/// A guard bound to a named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGuard {
    pub field: &'static str,
    pub guard: Guard,
}

impl fmt::Display for FieldGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.guard)
    }
}
