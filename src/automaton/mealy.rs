use tracing::debug;

use crate::{
    automaton::{build_table, check_declarations, AutomatonError},
    prelude::*,
    transition_system::run::run_from,
    Output, State, Symbol,
};

/// A Mealy machine is a transition system where each transition has an output. Thus, the output
/// of running a Mealy machine on a word produces a sequence of outputs, one for each transition
/// that is taken. Note that since the empty word does not take any transitions, it does not
/// produce any output. For a word of length `n`, there are `n` outputs.
///
/// The first declared state is the initial state. The transition table may be partial.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MealyMachine {
    states: Vec<State>,
    alphabet: Alphabet,
    transitions: TransitionTable<MealyEdge>,
}

impl TransitionSystem for MealyMachine {
    type Edge = MealyEdge;

    fn states(&self) -> &[State] {
        &self.states
    }

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn transitions(&self) -> &TransitionTable<MealyEdge> {
        &self.transitions
    }
}

impl MealyMachine {
    /// Builds a Mealy machine from its declared states (the first one is initial), its
    /// alphabet and transitions given as tuples `(source, symbol, output, target)`.
    ///
    /// # Example
    /// ```
    /// use transducers::prelude::*;
    ///
    /// let mm = MealyMachine::new(
    ///     ["A", "B"],
    ///     ["0"],
    ///     [("A", "0", "x", "B"), ("B", "0", "y", "A")],
    /// )
    /// .unwrap();
    /// assert_eq!(mm.run(["0", "0", "0"]), Some(vec!["x".into(), "y".into(), "x".into()]));
    /// ```
    pub fn new<Q, S, P, I, T, O, R>(states: Q, alphabet: S, transitions: T) -> Result<Self, AutomatonError>
    where
        Q: IntoIterator,
        Q::Item: Into<State>,
        S: IntoIterator,
        S::Item: Into<Symbol>,
        T: IntoIterator<Item = (P, I, O, R)>,
        P: Into<State>,
        I: Into<Symbol>,
        O: Into<Output>,
        R: Into<State>,
    {
        let (states, alphabet) =
            check_declarations(states.into_iter().map(Into::into).collect(), alphabet)?;
        let transitions = build_table(
            &states,
            &alphabet,
            transitions.into_iter().map(|(p, a, o, q)| {
                (p.into(), a.into(), MealyEdge::new(o.into(), q.into()))
            }),
        )?;
        Ok(Self {
            states,
            alphabet,
            transitions,
        })
    }

    /// Assembles a machine from parts that are known to be consistent.
    pub(crate) fn from_parts(
        states: Vec<State>,
        alphabet: Alphabet,
        transitions: TransitionTable<MealyEdge>,
    ) -> Self {
        debug_assert!(!states.is_empty());
        Self {
            states,
            alphabet,
            transitions,
        }
    }

    /// Returns the transition taken from `state` on `sym`.
    pub fn transition(&self, sym: &str, state: &str) -> Option<&MealyEdge> {
        self.transitions.get(sym, state)
    }

    /// Restricts `self` to the states that are reachable from the initial state. The
    /// remaining states keep their declaration order and transitions leaving unreachable
    /// states are dropped.
    pub fn prune(self) -> Self {
        let reachable = self.reachable_states();
        if reachable.len() == self.states.len() {
            return self;
        }
        debug!(
            "pruning {} unreachable states from mealy machine",
            self.states.len() - reachable.len()
        );
        let keep: math::Set<&str> = reachable.iter().map(|q| q.as_str()).collect();
        let mut transitions = self.transitions;
        transitions.retain_sources(|q| keep.contains(q.as_str()));
        Self {
            states: reachable,
            alphabet: self.alphabet,
            transitions,
        }
    }

    /// Runs `word` from the initial state and returns the sequence of outputs, one for each
    /// symbol. Returns `None` if some transition along the way is not defined.
    pub fn run<W, S>(&self, word: W) -> Option<Vec<Output>>
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        run_from(self, self.initial(), word)
            .ok()
            .map(|run| run.edges().iter().map(|e| e.output.clone()).collect())
    }

    /// Attempts to run the given finite word in `self`, returning the output of the last
    /// transition that is taken wrapped in `Some`. If no successful run on `input` is possible
    /// or `input` is empty, the function returns `None`.
    pub fn map<W, S>(&self, input: W) -> Option<Output>
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(input).and_then(|outputs| outputs.last().cloned())
    }

    /// Attempts to construct a word that separates the two machines, meaning it produces
    /// different outputs when run in both machines, or it can only be run in one of them.
    /// If no such word exists, the function returns `None`.
    pub fn witness_inequivalence(&self, other: &MealyMachine) -> Option<Vec<Symbol>> {
        witness_separation(self, other, |_, _| false, |e, f| e.output != f.output)
    }

    /// Returns true if and only if both machines are bisimilar, meaning for all possible
    /// inputs, they will produce the same output.
    pub fn bisimilar(&self, other: &MealyMachine) -> bool {
        self.witness_inequivalence(other).is_none()
    }
}

impl std::fmt::Display for MealyMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = crate::display::transition_table(self, None, |e: &MealyEdge| {
            format!("{}/{}", e.target, e.output)
        });
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn mealy_equivalence() {
        let mm1 = MealyMachine::new(
            ["0", "1", "2"],
            ["a", "b"],
            [
                ("0", "a", "1", "0"),
                ("0", "b", "0", "1"),
                ("1", "a", "1", "0"),
                ("1", "b", "0", "2"),
                ("2", "a", "1", "0"),
                ("2", "b", "0", "0"),
            ],
        )
        .unwrap();
        let mm2 = MealyMachine::new(
            ["0", "1", "2"],
            ["a", "b"],
            [
                ("0", "a", "1", "0"),
                ("0", "b", "0", "1"),
                ("1", "a", "1", "0"),
                ("1", "b", "0", "2"),
                ("2", "a", "1", "0"),
                ("2", "b", "1", "0"),
            ],
        )
        .unwrap();

        assert_eq!(
            mm1.witness_inequivalence(&mm2),
            Some(vec!["b".to_string(), "b".to_string(), "b".to_string()])
        );
        assert!(mm1.bisimilar(&mm1.clone()));
    }

    #[test]
    fn partial_machines_are_separated_by_missing_transitions() {
        let full = MealyMachine::new(
            ["A"],
            ["0", "1"],
            [("A", "0", "x", "A"), ("A", "1", "x", "A")],
        )
        .unwrap();
        let partial = MealyMachine::new(["A"], ["0", "1"], [("A", "0", "x", "A")]).unwrap();

        assert_eq!(full.map(["0", "1"]), Some("x".to_string()));
        assert_eq!(partial.map(["0", "1"]), None);
        assert_eq!(partial.map(Vec::<&str>::new()), None);
        assert_eq!(
            full.witness_inequivalence(&partial),
            Some(vec!["1".to_string()])
        );
    }

    #[test_log::test]
    fn pruning_removes_unreachable_states() {
        let mm = MealyMachine::new(
            ["A", "B", "C"],
            ["0", "1"],
            [
                ("A", "0", "x", "B"),
                ("A", "1", "y", "A"),
                ("B", "0", "y", "A"),
                ("B", "1", "x", "B"),
                ("C", "0", "x", "A"),
                ("C", "1", "x", "B"),
            ],
        )
        .unwrap();

        let pruned = mm.clone().prune();
        assert_eq!(pruned.states(), &["A", "B"]);
        assert_eq!(pruned.transitions().len(), 4);
        assert!(pruned.transition("0", "C").is_none());
        assert!(pruned.bisimilar(&mm));
        assert_eq!(pruned.clone().prune(), pruned);
    }
}
