use std::collections::VecDeque;

use tracing::trace;

use crate::{math::Set, State};

use super::TransitionSystem;

/// Allows iterating over the reachable states of a transition system. States are produced
/// in breadth-first order, where the successors of a state are explored in the order of
/// the alphabet. Missing transitions are simply skipped.
pub struct Reachable<'a, Ts: TransitionSystem> {
    ts: &'a Ts,
    seen: Set<&'a str>,
    queue: VecDeque<&'a State>,
}

impl<'a, Ts> Reachable<'a, Ts>
where
    Ts: TransitionSystem,
{
    /// Creates a new iterator that will yield the reachable states of the transition system starting
    /// from `origin`.
    pub fn new(ts: &'a Ts, origin: &'a State) -> Self {
        let mut seen = Set::default();
        seen.insert(origin.as_str());
        let mut queue = VecDeque::with_capacity(ts.size());
        queue.push_back(origin);
        Self { ts, seen, queue }
    }
}

impl<'a, Ts> Iterator for Reachable<'a, Ts>
where
    Ts: TransitionSystem,
{
    type Item = &'a State;

    fn next(&mut self) -> Option<Self::Item> {
        let ts = self.ts;
        let q = self.queue.pop_front()?;
        for sym in ts.alphabet().universe() {
            if let Some(p) = ts.successor(q, sym) {
                if self.seen.insert(p.as_str()) {
                    self.queue.push_back(p);
                }
            }
        }
        Some(q)
    }
}

/// Collects the states that are reachable from the initial state of `ts`, ordered as they
/// are declared.
pub(crate) fn reachable_in_declaration_order<Ts: TransitionSystem>(ts: &Ts) -> Vec<State> {
    let reachable: Set<&str> = ts.reachable_states_iter().map(|q| q.as_str()).collect();
    let out: Vec<State> = ts
        .states()
        .iter()
        .filter(|q| reachable.contains(q.as_str()))
        .cloned()
        .collect();
    trace!(
        "{} of {} states are reachable from {}",
        out.len(),
        ts.size(),
        ts.initial()
    );
    out
}
