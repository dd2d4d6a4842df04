//! Session Audit Log

use crate::fact::{Fact, FactId, FactKind};
use serde::{Deserialize, Serialize};

/// How a fact entered working memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// Declared by the caller before inference
    Asserted,
    /// Declared by a rule action
    Derived { rule: String },
}

/// One declared fact, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: FactId,
    pub fact: Fact,
    pub origin: Origin,
}

impl LogEntry {
    /// Type name of the logged fact
    pub fn fact_type(&self) -> &'static str {
        self.fact.kind().name()
    }
}

/// Ordered trace of every fact declared in a session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, id: FactId, fact: Fact, origin: Origin) {
        self.entries.push(LogEntry { id, fact, origin });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries of one fact kind
    pub fn of_kind(&self, kind: FactKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.fact.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
