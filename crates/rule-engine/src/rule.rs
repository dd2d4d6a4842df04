//! Rules and Rule Base

use crate::guard::{FieldGuard, Guard};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use working_memory::{Fact, FactId, FactKind, FactStore};

/// Errors raised while assembling a rule base
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A guard names a field the fact kind does not carry
    #[error("rule `{rule}`: {kind} has no field `{field}`")]
    UnknownField {
        rule: &'static str,
        kind: FactKind,
        field: &'static str,
    },

    /// Two rules share a name
    #[error("duplicate rule name `{0}`")]
    DuplicateName(&'static str),
}

/// A fact kind plus guards on its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    kind: FactKind,
    guards: Vec<FieldGuard>,
}

impl Pattern {
    /// Match any fact of `kind`
    pub fn new(kind: FactKind) -> Self {
        Self {
            kind,
            guards: Vec::new(),
        }
    }

    /// Add a guard on `field`
    pub fn with(mut self, field: &'static str, guard: Guard) -> Self {
        self.guards.push(FieldGuard { field, guard });
        self
    }

    pub fn kind(&self) -> FactKind {
        self.kind
    }

    pub fn guards(&self) -> &[FieldGuard] {
        &self.guards
    }

    /// True when the pattern has no field guards
    pub fn is_wildcard(&self) -> bool {
        self.guards.is_empty()
    }

    pub fn matches(&self, fact: &Fact) -> bool {
        fact.kind() == self.kind
            && self
                .guards
                .iter()
                .all(|g| g.guard.matches(fact.field(g.field)))
    }

    /// Whether no stored fact matches this pattern
    ///
    /// Wildcard patterns are answered from the per-kind index.
    pub fn is_absent_from(&self, store: &FactStore) -> bool {
        if self.is_wildcard() {
            store.count(self.kind) == 0
        } else {
            store.absent(self.kind, |fact| self.matches(fact))
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        if self.guards.is_empty() {
            f.write_str("*")?;
        }
        for (i, guard) in self.guards.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", guard)?;
        }
        f.write_str(")")
    }
}

/// One rule condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Some fact matches; the first such binding slot is filled by it
    Exists(Pattern),
    /// No fact matches
    Absent(Pattern),
}

impl Condition {
    pub fn pattern(&self) -> &Pattern {
        match self {
            Condition::Exists(p) | Condition::Absent(p) => p,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Exists(p) => write!(f, "{}", p),
            Condition::Absent(p) => write!(f, "not {}", p),
        }
    }
}

/// Facts bound to a rule's positive conditions, in condition order
#[derive(Debug, Clone)]
pub struct Bindings<'a> {
    facts: Vec<(FactId, &'a Fact)>,
}

impl<'a> Bindings<'a> {
    pub fn new(facts: Vec<(FactId, &'a Fact)>) -> Self {
        Self { facts }
    }

    /// Resolve bound ids against a store
    pub fn resolve(store: &'a FactStore, ids: &[FactId]) -> Self {
        Self {
            facts: ids
                .iter()
                .filter_map(|&id| store.get(id).map(|fact| (id, fact)))
                .collect(),
        }
    }

    /// Fact bound to the `slot`-th positive condition
    pub fn fact(&self, slot: usize) -> Option<&'a Fact> {
        self.facts.get(slot).map(|(_, fact)| *fact)
    }

    pub fn ids(&self) -> impl Iterator<Item = FactId> + '_ {
        self.facts.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Rule body: a pure function from bound facts to new facts
pub type Action = fn(&Bindings<'_>) -> Vec<Fact>;

/// A condition → action production with a salience
#[derive(Clone)]
pub struct Rule {
    name: &'static str,
    salience: i32,
    conditions: Vec<Condition>,
    action: Action,
}

impl Rule {
    /// Create a rule with salience 0 and no conditions
    pub fn new(name: &'static str, action: Action) -> Self {
        Self {
            name,
            salience: 0,
            conditions: Vec::new(),
            action,
        }
    }

    pub fn with_salience(mut self, salience: i32) -> Self {
        self.salience = salience;
        self
    }

    /// Require a matching fact and bind it
    pub fn when(mut self, pattern: Pattern) -> Self {
        self.conditions.push(Condition::Exists(pattern));
        self
    }

    /// Require that no fact matches
    pub fn unless(mut self, pattern: Pattern) -> Self {
        self.conditions.push(Condition::Absent(pattern));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn salience(&self) -> i32 {
        self.salience
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Patterns whose matches are bound, in binding-slot order
    pub fn positive(&self) -> impl Iterator<Item = &Pattern> {
        self.conditions.iter().filter_map(|c| match c {
            Condition::Exists(p) => Some(p),
            Condition::Absent(_) => None,
        })
    }

    pub fn negative(&self) -> impl Iterator<Item = &Pattern> {
        self.conditions.iter().filter_map(|c| match c {
            Condition::Absent(p) => Some(p),
            Condition::Exists(_) => None,
        })
    }

    /// Every binding that currently satisfies the rule's conditions
    ///
    /// Negations are checked against the store as it is now; an empty
    /// result means the rule is not eligible.
    pub fn instantiations(&self, store: &FactStore) -> Vec<Vec<FactId>> {
        if !self.negative().all(|p| p.is_absent_from(store)) {
            return Vec::new();
        }

        let mut partial: Vec<Vec<FactId>> = vec![Vec::new()];
        for pattern in self.positive() {
            let candidates: Vec<FactId> = store
                .of_kind(pattern.kind())
                .filter(|(_, fact)| pattern.matches(fact))
                .map(|(id, _)| id)
                .collect();

            if candidates.is_empty() {
                return Vec::new();
            }

            partial = partial
                .into_iter()
                .flat_map(|binding| {
                    candidates.iter().map(move |&id| {
                        let mut next = binding.clone();
                        next.push(id);
                        next
                    })
                })
                .collect();
        }
        partial
    }

    /// Run the action
    pub fn fire(&self, bindings: &Bindings<'_>) -> Vec<Fact> {
        (self.action)(bindings)
    }

    fn validate(&self) -> Result<(), RuleError> {
        for condition in &self.conditions {
            let pattern = condition.pattern();
            for guard in pattern.guards() {
                if !pattern.kind().has_field(guard.field) {
                    return Err(RuleError::UnknownField {
                        rule: self.name,
                        kind: pattern.kind(),
                        field: guard.field,
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("salience", &self.salience)
            .field("conditions", &self.conditions)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [salience {}]: ", self.name, self.salience)?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{}", condition)?;
        }
        Ok(())
    }
}

/// Immutable, validated set of rules
///
/// Built once and shared read-only across sessions.
#[derive(Debug, Clone, Default)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Validate and assemble a rule base
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let mut names = HashSet::new();
        for rule in &rules {
            if !names.insert(rule.name) {
                return Err(RuleError::DuplicateName(rule.name));
            }
            rule.validate()?;
        }
        Ok(Self { rules })
    }

    pub fn builder() -> RuleBaseBuilder {
        RuleBaseBuilder::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Incremental rule base assembly
#[derive(Debug, Default)]
pub struct RuleBaseBuilder {
    rules: Vec<Rule>,
}

impl RuleBaseBuilder {
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> Result<RuleBase, RuleError> {
        RuleBase::new(self.rules)
    }
}
