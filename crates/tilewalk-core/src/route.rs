//! Precomputed, consumable sequences of directional steps.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Ordered queue of directions an NPC follows autonomously.
///
/// A fresh route is empty, and a fully consumed route is
/// indistinguishable from a fresh one — by design, since the consumer
/// re-evaluates from scratch in either case. Routes are replaced
/// wholesale when recomputed or abandoned, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    steps: VecDeque<Direction>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn push(&mut self, step: Direction) {
        self.steps.push_back(step);
    }

    /// Consume and return the next queued step.
    ///
    /// Panics when the route is empty. Callers must check `is_empty()`
    /// first; popping an exhausted route is a route-management bug that
    /// should surface immediately rather than yield a silent default.
    pub fn next_step(&mut self) -> Direction {
        self.steps
            .pop_front()
            .expect("next_step called on an empty route")
    }
}
