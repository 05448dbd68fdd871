use thiserror::Error;

use crate::{prelude::*, State, Symbol};

mod mealy;
pub use mealy::MealyMachine;

mod moore;
pub use moore::MooreMachine;

/// Errors that are raised when the parts an automaton is built from are structurally
/// inconsistent. These are never recoverable, the caller handed us a table which does
/// not describe a deterministic machine.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum AutomatonError {
    #[error("automaton does not declare any states")]
    NoStates,
    #[error("state `{0}` is declared more than once")]
    DuplicateState(State),
    #[error("input symbol `{0}` is declared more than once")]
    DuplicateSymbol(Symbol),
    #[error("transition on `{symbol}` refers to undeclared state `{state}`")]
    UnknownState { symbol: Symbol, state: State },
    #[error("transition refers to undeclared input symbol `{0}`")]
    UnknownSymbol(Symbol),
    #[error("state `{state}` has more than one transition on `{symbol}`")]
    DuplicateTransition { symbol: Symbol, state: State },
    #[error("state `{0}` is not assigned an output")]
    MissingOutput(State),
    #[error("output is assigned to undeclared state `{0}`")]
    UndeclaredOutput(State),
    #[error("state `{0}` is assigned more than one output")]
    DuplicateOutput(State),
}

/// Distinguishes the two kinds of machines.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MachineKind {
    /// Output is attached to transitions.
    Mealy,
    /// Output is attached to states.
    Moore,
}

impl std::fmt::Display for MachineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineKind::Mealy => write!(f, "mealy"),
            MachineKind::Moore => write!(f, "moore"),
        }
    }
}

/// An automaton is either a [`MealyMachine`] or a [`MooreMachine`]. The two differ in the
/// shape of their transition and output functions, so they are kept as separate types and
/// this enum only dispatches the operations both support.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Automaton {
    /// A machine emitting output on transitions.
    Mealy(MealyMachine),
    /// A machine emitting output on states.
    Moore(MooreMachine),
}

impl Automaton {
    /// Returns which kind of machine `self` is.
    pub fn kind(&self) -> MachineKind {
        match self {
            Automaton::Mealy(_) => MachineKind::Mealy,
            Automaton::Moore(_) => MachineKind::Moore,
        }
    }

    /// The states in declaration order.
    pub fn states(&self) -> &[State] {
        match self {
            Automaton::Mealy(mm) => mm.states(),
            Automaton::Moore(mm) => mm.states(),
        }
    }

    /// The input alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        match self {
            Automaton::Mealy(mm) => mm.alphabet(),
            Automaton::Moore(mm) => mm.alphabet(),
        }
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states().len()
    }

    /// Removes all states that cannot be reached from the initial state.
    pub fn prune(self) -> Self {
        match self {
            Automaton::Mealy(mm) => Automaton::Mealy(mm.prune()),
            Automaton::Moore(mm) => Automaton::Moore(mm.prune()),
        }
    }

    /// Computes the minimal machine of the same kind that is equivalent to `self`.
    #[cfg(feature = "minimize")]
    pub fn minimize(self) -> Self {
        match self {
            Automaton::Mealy(mm) => Automaton::Mealy(mm.minimize()),
            Automaton::Moore(mm) => Automaton::Moore(mm.minimize()),
        }
    }

    /// Converts `self` into a [`MealyMachine`], which is a no-op if it already is one.
    pub fn into_mealy(self) -> MealyMachine {
        match self {
            Automaton::Mealy(mm) => mm,
            Automaton::Moore(mm) => mm.into_mealy(),
        }
    }

    /// Converts `self` into a [`MooreMachine`], which is a no-op if it already is one.
    pub fn into_moore(self) -> MooreMachine {
        match self {
            Automaton::Mealy(mm) => mm.into_moore(),
            Automaton::Moore(mm) => mm,
        }
    }
}

impl From<MealyMachine> for Automaton {
    fn from(value: MealyMachine) -> Self {
        Automaton::Mealy(value)
    }
}

impl From<MooreMachine> for Automaton {
    fn from(value: MooreMachine) -> Self {
        Automaton::Moore(value)
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Automaton::Mealy(mm) => mm.fmt(f),
            Automaton::Moore(mm) => mm.fmt(f),
        }
    }
}

/// Checks the parts that every machine shares and returns the alphabet. The state list
/// must be non-empty and duplicate free, as must be the alphabet.
pub(crate) fn check_declarations<Q, S>(
    states: Vec<State>,
    alphabet: S,
) -> Result<(Vec<State>, Alphabet), AutomatonError>
where
    S: IntoIterator<Item = Q>,
    Q: Into<Symbol>,
{
    if states.is_empty() {
        return Err(AutomatonError::NoStates);
    }
    let mut seen = math::Set::default();
    for q in &states {
        if !seen.insert(q.as_str()) {
            return Err(AutomatonError::DuplicateState(q.clone()));
        }
    }
    let alphabet = Alphabet::new(alphabet).map_err(AutomatonError::DuplicateSymbol)?;
    Ok((states, alphabet))
}

/// Inserts the given transitions into a fresh table, verifying that symbols and states
/// are declared and that no pair of symbol and source occurs twice.
pub(crate) fn build_table<E: IsEdge>(
    states: &[State],
    alphabet: &Alphabet,
    transitions: impl IntoIterator<Item = (State, Symbol, E)>,
) -> Result<TransitionTable<E>, AutomatonError> {
    let declared: math::Set<&str> = states.iter().map(|q| q.as_str()).collect();
    let mut table = TransitionTable::default();
    for (source, symbol, edge) in transitions {
        if !alphabet.contains(&symbol) {
            return Err(AutomatonError::UnknownSymbol(symbol));
        }
        for state in [&source, edge.target()] {
            if !declared.contains(state.as_str()) {
                return Err(AutomatonError::UnknownState {
                    symbol,
                    state: state.clone(),
                });
            }
        }
        if table.insert(symbol.clone(), source.clone(), edge).is_some() {
            return Err(AutomatonError::DuplicateTransition {
                symbol,
                state: source,
            });
        }
    }
    Ok(table)
}
