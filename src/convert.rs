//! Conversions between [`MealyMachine`]s and [`MooreMachine`]s.
//!
//! A Mealy machine becomes a Moore machine by splitting every state according to the output
//! with which it is entered, the new states are named `q0`, `q1`, ... following the sorted
//! order of the pairs of original state and output. The other direction moves the output
//! of every state onto the edges leading into it.
use tracing::debug;

use crate::{
    math::{Bijection, Map},
    naming::CanonicalNamer,
    prelude::*,
    Output, State,
};

impl MealyMachine {
    /// Builds a [`MooreMachine`] that produces the same outputs as `self`. Unreachable states
    /// are pruned first. Every distinct pair of target state and output that occurs on a
    /// transition becomes a state of the result, if the initial state is never entered an
    /// additional pair with empty output is created for it.
    ///
    /// The states of the result are listed with the initial one first, followed by the others
    /// in the order in which they were named.
    pub fn into_moore(self) -> MooreMachine {
        let mm = self.prune();
        let initial = mm.initial().clone();

        let mut pairs: Vec<(State, Output)> = mm
            .transitions()
            .iter()
            .map(|(_, _, e)| (e.target.clone(), e.output.clone()))
            .collect();
        if !pairs.iter().any(|(q, _)| *q == initial) {
            pairs.push((initial.clone(), Output::new()));
        }
        pairs.sort();
        pairs.dedup();

        let mut namer = CanonicalNamer::states();
        let names: Bijection<(State, Output), State> = pairs
            .into_iter()
            .map(|pair| {
                let name = namer.name(pair.clone()).clone();
                (pair, name)
            })
            .collect();

        let mut transitions = TransitionTable::default();
        for sym in mm.alphabet().universe() {
            for ((q, _), name) in names.iter() {
                let Some(edge) = mm.transition(sym, q) else {
                    continue;
                };
                let target = names
                    .get_by_left(&(edge.target.clone(), edge.output.clone()))
                    .expect("every transition induces a pair");
                transitions.insert(sym.clone(), name.clone(), target.clone());
            }
        }

        let start = names
            .iter()
            .find(|((q, _), _)| *q == initial)
            .map(|(_, name)| name.clone())
            .expect("the initial state is part of some pair");
        let states: Vec<State> = std::iter::once(start.clone())
            .chain(
                names
                    .iter()
                    .map(|(_, name)| name)
                    .filter(|name| **name != start)
                    .cloned(),
            )
            .collect();
        let outputs: Map<State, Output> = states
            .iter()
            .map(|name| {
                let (_, o) = names.get_by_right(name).expect("every state has a pair");
                (name.clone(), o.clone())
            })
            .collect();

        debug!(
            "converted mealy machine with {} states into moore machine with {} states",
            mm.size(),
            states.len()
        );
        MooreMachine::from_parts(states, mm.alphabet().clone(), transitions, outputs)
    }
}

impl MooreMachine {
    /// Pushes the output of every state onto the edges leading into it, which results in
    /// a [`MealyMachine`] producing the same outputs as `self`. Unreachable states are
    /// pruned first.
    pub fn into_mealy(self) -> MealyMachine {
        let mm = self.prune();
        let mut transitions = TransitionTable::default();
        for sym in mm.alphabet().universe() {
            for q in mm.states() {
                let Some(target) = mm.transition(sym, q) else {
                    continue;
                };
                let output = mm
                    .output(target)
                    .expect("every reachable state has an output");
                transitions.insert(
                    sym.clone(),
                    q.clone(),
                    MealyEdge::new(output.clone(), target.clone()),
                );
            }
        }
        debug!(
            "converted moore machine with {} states into mealy machine",
            mm.size()
        );
        MealyMachine::from_parts(mm.states().to_vec(), mm.alphabet().clone(), transitions)
    }
}
