//! Fact Definitions

use crate::categorical::{
    Context, Frequency, HierarchicalRelation, History, Impact, Intention, NonVerbal,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest severity level a classifier may suggest
pub const MIN_SEVERITY_LEVEL: u8 = 1;
/// Highest severity level a classifier may suggest
pub const MAX_SEVERITY_LEVEL: u8 = 6;

/// Monotonic sequence id assigned on declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(u64);

impl FactId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Raw sequence number (starts at 1)
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f-{}", self.0)
    }
}

/// Where an explanation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplanationSource {
    /// Classifier-backed base level
    #[serde(rename = "AI")]
    Ai,
    /// Engine notices (e.g. undetermined level)
    System,
    /// Categorical factor selected by the caller
    AdditionalFactor,
}

impl ExplanationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplanationSource::Ai => "AI",
            ExplanationSource::System => "System",
            ExplanationSource::AdditionalFactor => "AdditionalFactor",
        }
    }
}

/// Fact kind tag, used by rule conditions and the existence index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactKind {
    ConductDescription,
    #[serde(rename = "ContextFact")]
    Context,
    #[serde(rename = "HistoryFact")]
    History,
    #[serde(rename = "FrequencyFact")]
    Frequency,
    #[serde(rename = "ImpactFact")]
    Impact,
    #[serde(rename = "NonVerbalFact")]
    NonVerbal,
    #[serde(rename = "IntentionFact")]
    Intention,
    #[serde(rename = "HierarchicalRelationFact")]
    HierarchicalRelation,
    ClassifierResult,
    Severity,
    Explanation,
    Recommendation,
}

impl FactKind {
    /// Number of fact kinds
    pub const COUNT: usize = 12;

    pub const ALL: [FactKind; Self::COUNT] = [
        FactKind::ConductDescription,
        FactKind::Context,
        FactKind::History,
        FactKind::Frequency,
        FactKind::Impact,
        FactKind::NonVerbal,
        FactKind::Intention,
        FactKind::HierarchicalRelation,
        FactKind::ClassifierResult,
        FactKind::Severity,
        FactKind::Explanation,
        FactKind::Recommendation,
    ];

    /// Type name shown in the audit log
    pub fn name(&self) -> &'static str {
        match self {
            FactKind::ConductDescription => "ConductDescription",
            FactKind::Context => "ContextFact",
            FactKind::History => "HistoryFact",
            FactKind::Frequency => "FrequencyFact",
            FactKind::Impact => "ImpactFact",
            FactKind::NonVerbal => "NonVerbalFact",
            FactKind::Intention => "IntentionFact",
            FactKind::HierarchicalRelation => "HierarchicalRelationFact",
            FactKind::ClassifierResult => "ClassifierResult",
            FactKind::Severity => "Severity",
            FactKind::Explanation => "Explanation",
            FactKind::Recommendation => "Recommendation",
        }
    }

    /// Field names carried by this kind
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            FactKind::ConductDescription => &["text"],
            FactKind::Context => &["context"],
            FactKind::History => &["history"],
            FactKind::Frequency => &["frequency"],
            FactKind::Impact => &["impact"],
            FactKind::NonVerbal => &["non_verbal"],
            FactKind::Intention => &["intention"],
            FactKind::HierarchicalRelation => &["relation"],
            FactKind::ClassifierResult => &["suggested_level", "detected_keywords", "succeeded"],
            FactKind::Severity => &["level", "description"],
            FactKind::Explanation => &["text", "source"],
            FactKind::Recommendation => &["text"],
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of a single fact field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
    Bool(bool),
    TextList(&'a [String]),
    /// Unknown field, or an optional field with no value
    Missing,
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::TextList(items) => write!(f, "{:?}", items),
            FieldValue::Missing => f.write_str("<missing>"),
        }
    }
}

/// A fact declared into working memory
///
/// Facts are never edited after declaration; a correction is a new fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "fields")]
pub enum Fact {
    /// Free-text description of the conduct
    ConductDescription { text: String },

    #[serde(rename = "ContextFact")]
    Context { context: Context },

    #[serde(rename = "HistoryFact")]
    History { history: History },

    #[serde(rename = "FrequencyFact")]
    Frequency { frequency: Frequency },

    #[serde(rename = "ImpactFact")]
    Impact { impact: Impact },

    #[serde(rename = "NonVerbalFact")]
    NonVerbal { non_verbal: NonVerbal },

    #[serde(rename = "IntentionFact")]
    Intention { intention: Intention },

    #[serde(rename = "HierarchicalRelationFact")]
    HierarchicalRelation { relation: HierarchicalRelation },

    /// Normalized output of the external classifier
    ClassifierResult {
        suggested_level: Option<u8>,
        detected_keywords: Vec<String>,
        succeeded: bool,
    },

    /// Derived base classification (0 = undetermined)
    Severity { level: u8, description: String },

    Explanation {
        text: String,
        source: ExplanationSource,
    },

    Recommendation { text: String },
}

impl Fact {
    pub fn severity(level: u8, description: impl Into<String>) -> Self {
        Fact::Severity {
            level,
            description: description.into(),
        }
    }

    pub fn explanation(text: impl Into<String>, source: ExplanationSource) -> Self {
        Fact::Explanation {
            text: text.into(),
            source,
        }
    }

    pub fn recommendation(text: impl Into<String>) -> Self {
        Fact::Recommendation { text: text.into() }
    }

    /// Kind tag of this fact
    pub fn kind(&self) -> FactKind {
        match self {
            Fact::ConductDescription { .. } => FactKind::ConductDescription,
            Fact::Context { .. } => FactKind::Context,
            Fact::History { .. } => FactKind::History,
            Fact::Frequency { .. } => FactKind::Frequency,
            Fact::Impact { .. } => FactKind::Impact,
            Fact::NonVerbal { .. } => FactKind::NonVerbal,
            Fact::Intention { .. } => FactKind::Intention,
            Fact::HierarchicalRelation { .. } => FactKind::HierarchicalRelation,
            Fact::ClassifierResult { .. } => FactKind::ClassifierResult,
            Fact::Severity { .. } => FactKind::Severity,
            Fact::Explanation { .. } => FactKind::Explanation,
            Fact::Recommendation { .. } => FactKind::Recommendation,
        }
    }

    /// Look up a field by name
    ///
    /// Categorical fields are exposed through their wire code.
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        match (self, name) {
            (Fact::ConductDescription { text }, "text") => FieldValue::Text(text),
            (Fact::Context { context }, "context") => FieldValue::Text(context.code()),
            (Fact::History { history }, "history") => FieldValue::Text(history.code()),
            (Fact::Frequency { frequency }, "frequency") => FieldValue::Text(frequency.code()),
            (Fact::Impact { impact }, "impact") => FieldValue::Text(impact.code()),
            (Fact::NonVerbal { non_verbal }, "non_verbal") => FieldValue::Text(non_verbal.code()),
            (Fact::Intention { intention }, "intention") => FieldValue::Text(intention.code()),
            (Fact::HierarchicalRelation { relation }, "relation") => {
                FieldValue::Text(relation.code())
            }
            (Fact::ClassifierResult { suggested_level, .. }, "suggested_level") => {
                suggested_level.map_or(FieldValue::Missing, |l| FieldValue::Int(i64::from(l)))
            }
            (Fact::ClassifierResult { detected_keywords, .. }, "detected_keywords") => {
                FieldValue::TextList(detected_keywords)
            }
            (Fact::ClassifierResult { succeeded, .. }, "succeeded") => FieldValue::Bool(*succeeded),
            (Fact::Severity { level, .. }, "level") => FieldValue::Int(i64::from(*level)),
            (Fact::Severity { description, .. }, "description") => FieldValue::Text(description),
            (Fact::Explanation { text, .. }, "text") => FieldValue::Text(text),
            (Fact::Explanation { source, .. }, "source") => FieldValue::Text(source.as_str()),
            (Fact::Recommendation { text }, "text") => FieldValue::Text(text),
            _ => FieldValue::Missing,
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        write!(f, "{}(", kind)?;
        for (i, name) in kind.fields().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, self.field(name))?;
        }
        f.write_str(")")
    }
}
