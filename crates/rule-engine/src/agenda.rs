//! Agenda and Conflict Resolution

use crate::rule::RuleBase;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use working_memory::{FactId, FactStore};

/// An eligible rule instantiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Index of the rule in its rule base
    pub rule: usize,
    pub salience: i32,
    /// Bound fact ids, in positive-condition order
    pub binding: Vec<FactId>,
    /// Most recent fact in the binding (`None` for fact-free rules)
    pub recency: Option<FactId>,
}

impl Activation {
    pub fn new(rule: usize, salience: i32, binding: Vec<FactId>) -> Self {
        let recency = binding.iter().copied().max();
        Self {
            rule,
            salience,
            binding,
            recency,
        }
    }
}

impl Ord for Activation {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: higher salience first, then the instantiation whose
        // latest fact was declared earliest, then rule declaration order
        self.salience
            .cmp(&other.salience)
            .then_with(|| other.recency.cmp(&self.recency))
            .then_with(|| other.rule.cmp(&self.rule))
            .then_with(|| other.binding.cmp(&self.binding))
    }
}

impl PartialOrd for Activation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Currently eligible, not-yet-fired instantiations
#[derive(Debug, Default)]
pub struct Agenda {
    queue: BinaryHeap<Activation>,
}

impl Agenda {
    /// Match every rule against the store, skipping fired bindings
    pub fn build(
        rules: &RuleBase,
        store: &FactStore,
        fired: &HashSet<(usize, Vec<FactId>)>,
    ) -> Self {
        let mut queue = BinaryHeap::new();
        for (index, rule) in rules.rules().iter().enumerate() {
            for binding in rule.instantiations(store) {
                if fired.contains(&(index, binding.clone())) {
                    continue;
                }
                queue.push(Activation::new(index, rule.salience(), binding));
            }
        }
        Self { queue }
    }

    /// Highest-priority activation
    pub fn pop(&mut self) -> Option<Activation> {
        self.queue.pop()
    }

    pub fn peek(&self) -> Option<&Activation> {
        self.queue.peek()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Activations in firing order (consumes the agenda)
    pub fn into_sorted(self) -> Vec<Activation> {
        let mut sorted = self.queue.into_sorted_vec();
        sorted.reverse();
        sorted
    }
}
