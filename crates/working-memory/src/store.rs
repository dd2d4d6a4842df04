//! Append-Only Fact Store

use crate::fact::{Fact, FactId, FactKind};
use crate::log::{Origin, SessionLog};
use std::collections::HashMap;
use tracing::debug;

/// Result of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// Fact was appended under a fresh id
    New(FactId),
    /// A structurally equal fact already existed; nothing was stored
    Duplicate(FactId),
}

impl Declaration {
    pub fn id(&self) -> FactId {
        match self {
            Declaration::New(id) | Declaration::Duplicate(id) => *id,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Declaration::New(_))
    }
}

/// Working memory for one evaluation session
///
/// Facts are never removed or edited. Each declaration is recorded in the
/// session log, and a per-kind index answers existence checks for
/// wildcard patterns in O(1).
#[derive(Debug, Clone)]
pub struct FactStore {
    /// Facts in declaration order; position `i` holds id `i + 1`
    facts: Vec<Fact>,
    /// Positions of each kind's facts
    by_kind: [Vec<usize>; FactKind::COUNT],
    /// Structural index used to reject duplicates
    seen: HashMap<Fact, FactId>,
    log: SessionLog,
}

impl FactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            facts: Vec::new(),
            by_kind: std::array::from_fn(|_| Vec::new()),
            seen: HashMap::new(),
            log: SessionLog::new(),
        }
    }

    /// Declare a caller-asserted fact and return its id
    pub fn declare(&mut self, fact: Fact) -> FactId {
        self.declare_with_origin(fact, Origin::Asserted).id()
    }

    /// Declare a fact with an explicit origin
    pub fn declare_with_origin(&mut self, fact: Fact, origin: Origin) -> Declaration {
        if let Some(&existing) = self.seen.get(&fact) {
            debug!("Duplicate {} ignored (already {})", fact.kind(), existing);
            return Declaration::Duplicate(existing);
        }

        let position = self.facts.len();
        let id = FactId::new(position as u64 + 1);
        debug!("Declared {} {}", id, fact);

        self.by_kind[fact.kind().index()].push(position);
        self.seen.insert(fact.clone(), id);
        self.log.record(id, fact.clone(), origin);
        self.facts.push(fact);

        Declaration::New(id)
    }

    /// True iff a fact of `kind` satisfies `predicate`
    pub fn exists<P>(&self, kind: FactKind, predicate: P) -> bool
    where
        P: Fn(&Fact) -> bool,
    {
        self.of_kind(kind).any(|(_, fact)| predicate(fact))
    }

    /// Negation of [`FactStore::exists`], evaluated against current contents
    pub fn absent<P>(&self, kind: FactKind, predicate: P) -> bool
    where
        P: Fn(&Fact) -> bool,
    {
        !self.exists(kind, predicate)
    }

    /// Number of facts of `kind`
    pub fn count(&self, kind: FactKind) -> usize {
        self.by_kind[kind.index()].len()
    }

    /// Facts of `kind`, in declaration order
    pub fn of_kind(&self, kind: FactKind) -> impl Iterator<Item = (FactId, &Fact)> + '_ {
        self.by_kind[kind.index()]
            .iter()
            .map(move |&pos| (FactId::new(pos as u64 + 1), &self.facts[pos]))
    }

    /// Fetch a fact by id
    pub fn get(&self, id: FactId) -> Option<&Fact> {
        let pos = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.facts.get(pos)
    }

    /// All facts, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (FactId, &Fact)> {
        self.facts
            .iter()
            .enumerate()
            .map(|(pos, fact)| (FactId::new(pos as u64 + 1), fact))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Session log of every declaration
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn into_log(self) -> SessionLog {
        self.log
    }
}

impl Default for FactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorical::{Context, Impact};
    use crate::fact::ExplanationSource;

    #[test]
    fn test_sequence_ids_are_monotonic() {
        let mut store = FactStore::new();
        let a = store.declare(Fact::ConductDescription { text: "a".into() });
        let b = store.declare(Fact::Context { context: Context::FormalPublic });
        let c = store.declare(Fact::Impact { impact: Impact::IntenseNegative });

        assert_eq!(a.get(), 1);
        assert!(a < b && b < c);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(b), Some(&Fact::Context { context: Context::FormalPublic }));
    }

    #[test]
    fn test_exists_and_absent() {
        let mut store = FactStore::new();
        assert!(store.absent(FactKind::Severity, |_| true));

        store.declare(Fact::severity(3, "Offensive"));

        assert!(store.exists(FactKind::Severity, |_| true));
        assert!(store.exists(FactKind::Severity, |f| matches!(f, Fact::Severity { level: 3, .. })));
        assert!(store.absent(FactKind::Severity, |f| matches!(f, Fact::Severity { level: 6, .. })));
        assert!(store.absent(FactKind::Recommendation, |_| true));
    }

    #[test]
    fn test_absent_reflects_later_declarations() {
        let mut store = FactStore::new();
        let is_ai = |f: &Fact| matches!(f, Fact::Explanation { source: ExplanationSource::Ai, .. });

        assert!(store.absent(FactKind::Explanation, is_ai));
        store.declare(Fact::explanation("base", ExplanationSource::Ai));
        assert!(!store.absent(FactKind::Explanation, is_ai));
    }

    #[test]
    fn test_kind_index_counts() {
        let mut store = FactStore::new();
        store.declare(Fact::recommendation("one"));
        store.declare(Fact::recommendation("two"));
        store.declare(Fact::severity(1, "Generally non-offensive"));

        assert_eq!(store.count(FactKind::Recommendation), 2);
        assert_eq!(store.count(FactKind::Severity), 1);
        assert_eq!(store.count(FactKind::Explanation), 0);

        let texts: Vec<_> = store
            .of_kind(FactKind::Recommendation)
            .map(|(id, f)| (id.get(), f.field("text").to_string()))
            .collect();
        assert_eq!(texts, vec![(1, "\"one\"".to_string()), (2, "\"two\"".to_string())]);
    }

    #[test]
    fn test_duplicates_are_not_stored() {
        let mut store = FactStore::new();
        let first = store.declare_with_origin(
            Fact::Context { context: Context::FormalPublic },
            Origin::Asserted,
        );
        let second = store.declare_with_origin(
            Fact::Context { context: Context::FormalPublic },
            Origin::Asserted,
        );

        assert!(first.is_new());
        assert_eq!(second, Declaration::Duplicate(first.id()));
        assert_eq!(store.count(FactKind::Context), 1);
        assert_eq!(store.log().len(), 1);
    }

    #[test]
    fn test_log_records_origin() {
        let mut store = FactStore::new();
        store.declare(Fact::ConductDescription { text: "text".into() });
        store.declare_with_origin(
            Fact::recommendation("act"),
            Origin::Derived { rule: "recommend".into() },
        );

        let entries = store.log().entries();
        assert_eq!(entries[0].origin, Origin::Asserted);
        assert_eq!(entries[0].fact_type(), "ConductDescription");
        assert_eq!(entries[1].origin, Origin::Derived { rule: "recommend".into() });
        assert_eq!(store.log().of_kind(FactKind::Recommendation).count(), 1);
    }

    #[test]
    fn test_unknown_id() {
        let store = FactStore::new();
        assert_eq!(store.get(FactId::new(0)), None);
        assert_eq!(store.get(FactId::new(7)), None);
    }
}
