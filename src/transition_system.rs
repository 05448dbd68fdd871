use std::fmt::Debug;

use crate::{alphabet::Alphabet, math::Map, Output, State, Symbol};

/// Reachability analysis, see [`reachable::Reachable`].
pub mod reachable;
pub use reachable::Reachable;

/// Running words through a transition system.
pub mod run;

/// Searching for words that separate two machines.
pub mod bisimulation;
pub use bisimulation::witness_separation;

/// Abstracts the value that is stored for a single transition. Every edge has a target,
/// edges of a Mealy machine additionally carry an output.
pub trait IsEdge: Clone + Debug + Eq {
    /// The state that the edge leads to.
    fn target(&self) -> &State;
}

impl IsEdge for State {
    fn target(&self) -> &State {
        self
    }
}

/// A transition of a Mealy machine, it emits `output` while moving to `target`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MealyEdge {
    /// The emitted output.
    pub output: Output,
    /// The state that is reached.
    pub target: State,
}

impl MealyEdge {
    /// Creates a new edge emitting `output` and leading to `target`.
    pub fn new(output: impl Into<Output>, target: impl Into<State>) -> Self {
        Self {
            output: output.into(),
            target: target.into(),
        }
    }
}

impl IsEdge for MealyEdge {
    fn target(&self) -> &State {
        &self.target
    }
}

/// Stores the transitions of a machine keyed by input symbol and source state. The table
/// may be partial, a missing entry means that no transition is defined for the pair.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransitionTable<E>(Map<Symbol, Map<State, E>>);

impl<E> Default for TransitionTable<E> {
    fn default() -> Self {
        Self(Map::default())
    }
}

impl<E> TransitionTable<E> {
    /// Returns the entry for `sym` and `source`, if one exists.
    pub fn get(&self, sym: &str, source: &str) -> Option<&E> {
        self.0.get(sym).and_then(|row| row.get(source))
    }

    /// Inserts a transition, returning the previous entry for the same pair.
    pub fn insert(&mut self, sym: Symbol, source: State, edge: E) -> Option<E> {
        self.0.entry(sym).or_default().insert(source, edge)
    }

    /// Inserts a transition unless an entry for the pair already exists.
    pub fn insert_if_vacant(&mut self, sym: &str, source: &str, edge: E) {
        let row = self.0.entry(sym.to_string()).or_default();
        if !row.contains_key(source) {
            row.insert(source.to_string(), edge);
        }
    }

    /// Iterates over all transitions as triples of symbol, source and edge.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &State, &E)> + '_ {
        self.0
            .iter()
            .flat_map(|(sym, row)| row.iter().map(move |(q, e)| (sym, q, e)))
    }

    /// Drops every transition whose source does not satisfy `keep`.
    pub fn retain_sources<F: Fn(&State) -> bool>(&mut self, keep: F) {
        for row in self.0.values_mut() {
            row.retain(|q, _| keep(q));
        }
    }

    /// The number of defined transitions.
    pub fn len(&self) -> usize {
        self.0.values().map(|row| row.len()).sum()
    }

    /// Returns true if no transition is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The interface that reachability, runs and minimization are written against. A transition
/// system has a non-empty ordered list of states, the first of which is initial, an ordered
/// [`Alphabet`] and a (possibly partial) deterministic transition table.
pub trait TransitionSystem {
    /// The value stored per transition.
    type Edge: IsEdge;

    /// The states in declaration order.
    fn states(&self) -> &[State];

    /// The input alphabet.
    fn alphabet(&self) -> &Alphabet;

    /// The underlying transition table.
    fn transitions(&self) -> &TransitionTable<Self::Edge>;

    /// The designated initial state, which is the first declared state.
    fn initial(&self) -> &State {
        &self.states()[0]
    }

    /// The number of states.
    fn size(&self) -> usize {
        self.states().len()
    }

    /// Returns true if `state` is declared.
    fn contains_state(&self, state: &str) -> bool {
        self.states().iter().any(|q| q == state)
    }

    /// Returns the edge taken from `source` on `sym`, if it exists.
    fn edge(&self, source: &str, sym: &str) -> Option<&Self::Edge> {
        self.transitions().get(sym, source)
    }

    /// Returns the state that is reached from `source` on `sym`, if a transition exists.
    fn successor(&self, source: &str, sym: &str) -> Option<&State> {
        self.edge(source, sym).map(IsEdge::target)
    }

    /// Iterates over the states reachable from the initial state in breadth-first order.
    fn reachable_states_iter(&self) -> Reachable<'_, Self>
    where
        Self: Sized,
    {
        Reachable::new(self, self.initial())
    }

    /// Returns the reachable states ordered by declaration, not by discovery.
    fn reachable_states(&self) -> Vec<State>
    where
        Self: Sized,
    {
        reachable::reachable_in_declaration_order(self)
    }
}
