use tracing::debug;

use crate::{
    automaton::{build_table, check_declarations, AutomatonError},
    prelude::*,
    transition_system::run::run_from,
    Output, State, Symbol,
};

/// A Moore machine is a transition system where each state has an output. Thus, the output
/// of running a Moore machine on a word produces a sequence of outputs, one for each state
/// that is visited. For a word of length `n`, there are `n+1` outputs, note in particular
/// that the empty word produce an output, which is in contrast to [`MealyMachine`]s, where
/// the empty word produces no output.
///
/// The first declared state is the initial state, every declared state has precisely one
/// output and the transition table may be partial.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MooreMachine {
    states: Vec<State>,
    alphabet: Alphabet,
    transitions: TransitionTable<State>,
    outputs: math::Map<State, Output>,
}

impl TransitionSystem for MooreMachine {
    type Edge = State;

    fn states(&self) -> &[State] {
        &self.states
    }

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn transitions(&self) -> &TransitionTable<State> {
        &self.transitions
    }
}

impl MooreMachine {
    /// Builds a Moore machine from its declared states (the first one is initial), its
    /// alphabet, transitions given as tuples `(source, symbol, target)` and the output of
    /// every state.
    ///
    /// # Example
    /// ```
    /// use transducers::prelude::*;
    ///
    /// let mm = MooreMachine::new(
    ///     ["A", "B"],
    ///     ["0"],
    ///     [("A", "0", "B"), ("B", "0", "A")],
    ///     [("A", "x"), ("B", "y")],
    /// )
    /// .unwrap();
    /// assert_eq!(mm.map(["0"]), Some("y".to_string()));
    /// assert_eq!(mm.map(Vec::<&str>::new()), Some("x".to_string()));
    /// ```
    pub fn new<Q, S, P, I, R, T, U, V, O>(
        states: Q,
        alphabet: S,
        transitions: T,
        outputs: O,
    ) -> Result<Self, AutomatonError>
    where
        Q: IntoIterator,
        Q::Item: Into<State>,
        S: IntoIterator,
        S::Item: Into<Symbol>,
        T: IntoIterator<Item = (P, I, R)>,
        P: Into<State>,
        I: Into<Symbol>,
        R: Into<State>,
        O: IntoIterator<Item = (U, V)>,
        U: Into<State>,
        V: Into<Output>,
    {
        let (states, alphabet) =
            check_declarations(states.into_iter().map(Into::into).collect(), alphabet)?;
        let transitions = build_table(
            &states,
            &alphabet,
            transitions
                .into_iter()
                .map(|(p, a, q)| (p.into(), a.into(), q.into())),
        )?;

        let mut assigned: math::Map<State, Output> = math::Map::default();
        for (q, o) in outputs {
            let q: State = q.into();
            if !states.contains(&q) {
                return Err(AutomatonError::UndeclaredOutput(q));
            }
            if assigned.contains_key(&q) {
                return Err(AutomatonError::DuplicateOutput(q));
            }
            assigned.insert(q, o.into());
        }
        let mut outputs = math::Map::with_capacity(states.len());
        for q in &states {
            let Some(o) = assigned.swap_remove(q) else {
                return Err(AutomatonError::MissingOutput(q.clone()));
            };
            outputs.insert(q.clone(), o);
        }

        Ok(Self {
            states,
            alphabet,
            transitions,
            outputs,
        })
    }

    /// Assembles a machine from parts that are known to be consistent.
    pub(crate) fn from_parts(
        states: Vec<State>,
        alphabet: Alphabet,
        transitions: TransitionTable<State>,
        outputs: math::Map<State, Output>,
    ) -> Self {
        debug_assert!(!states.is_empty());
        debug_assert!(states.iter().all(|q| outputs.contains_key(q)));
        Self {
            states,
            alphabet,
            transitions,
            outputs,
        }
    }

    /// Returns the target of the transition from `state` on `sym`.
    pub fn transition(&self, sym: &str, state: &str) -> Option<&State> {
        self.transitions.get(sym, state)
    }

    /// Returns the output of `state`.
    pub fn output(&self, state: &str) -> Option<&Output> {
        self.outputs.get(state)
    }

    /// Returns the outputs of all states, in declaration order.
    pub fn outputs(&self) -> &math::Map<State, Output> {
        &self.outputs
    }

    /// Restricts `self` to the states that are reachable from the initial state. The
    /// remaining states keep their declaration order, transitions leaving unreachable states
    /// as well as the outputs of unreachable states are dropped.
    pub fn prune(self) -> Self {
        let reachable = self.reachable_states();
        if reachable.len() == self.states.len() {
            return self;
        }
        debug!(
            "pruning {} unreachable states from moore machine",
            self.states.len() - reachable.len()
        );
        let keep: math::Set<&str> = reachable.iter().map(|q| q.as_str()).collect();
        let mut transitions = self.transitions;
        transitions.retain_sources(|q| keep.contains(q.as_str()));
        let mut outputs = self.outputs;
        outputs.retain(|q, _| keep.contains(q.as_str()));
        Self {
            states: reachable,
            alphabet: self.alphabet,
            transitions,
            outputs,
        }
    }

    /// Runs `word` from the initial state and returns the outputs of the states that are
    /// entered, one for each symbol. The output of the initial state is not part of the
    /// result. Returns `None` if some transition along the way is not defined.
    pub fn run<W, S>(&self, word: W) -> Option<Vec<Output>>
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let run = run_from(self, self.initial(), word).ok()?;
        run.states()
            .iter()
            .skip(1)
            .map(|q| self.output(q).cloned())
            .collect()
    }

    /// Runs the given `input` word in self. If the run is successful, the output of the state
    /// that it reaches is emitted (wrapped in a `Some`). For unsuccessful runs, `None` is
    /// returned.
    pub fn map<W, S>(&self, input: W) -> Option<Output>
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let run = run_from(self, self.initial(), input).ok()?;
        self.output(run.reached()).cloned()
    }

    /// Returns a witness for the non-bisimilarity of `self` and `other`, i.e. a finite word
    /// that produces different outputs in the two moore machines. If the two machines are
    /// bisimilar, `None` is returned.
    pub fn witness_non_bisimilarity(&self, other: &MooreMachine) -> Option<Vec<Symbol>> {
        witness_separation(
            self,
            other,
            |p, q| self.output(p) != other.output(q),
            |_, _| false,
        )
    }

    /// Returns true if `self` is bisimilar to `other`, i.e. if the two moore machines
    /// produce the same output for each finite word.
    pub fn bisimilar(&self, other: &MooreMachine) -> bool {
        self.witness_non_bisimilarity(other).is_none()
    }
}

impl std::fmt::Display for MooreMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outputs: &dyn Fn(&State) -> String =
            &|q| self.output(q).cloned().unwrap_or_default();
        let table = crate::display::transition_table(self, Some(outputs), |q: &State| q.clone());
        write!(f, "{table}")
    }
}
