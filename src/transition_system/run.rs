use crate::State;

use super::{IsEdge, TransitionSystem};

/// A run is a sequence of states and edges that is consistent with the transition system.
/// For a word of length `n` a run visits `n + 1` states and takes `n` edges.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FiniteRun<'a, E> {
    states: Vec<&'a State>,
    edges: Vec<&'a E>,
}

impl<'a, E: IsEdge> FiniteRun<'a, E> {
    /// The visited states, starting with the origin of the run.
    pub fn states(&self) -> &[&'a State] {
        &self.states
    }

    /// The edges that are taken, one per symbol of the input.
    pub fn edges(&self) -> &[&'a E] {
        &self.edges
    }

    /// The state in which the run ends.
    pub fn reached(&self) -> &'a State {
        self.states
            .last()
            .copied()
            .expect("a run always visits its origin")
    }
}

/// Runs `word` in `ts` starting from `origin`. If some transition along the way is missing
/// or a symbol is not part of the alphabet, the position of the offending symbol is
/// returned as error.
pub fn run_from<'a, Ts, W, S>(
    ts: &'a Ts,
    origin: &'a State,
    word: W,
) -> Result<FiniteRun<'a, Ts::Edge>, usize>
where
    Ts: TransitionSystem,
    W: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut states = vec![origin];
    let mut edges = vec![];
    let mut current = origin;
    for (position, sym) in word.into_iter().enumerate() {
        let edge = ts.edge(current, sym.as_ref()).ok_or(position)?;
        current = edge.target();
        edges.push(edge);
        states.push(current);
    }
    Ok(FiniteRun { states, edges })
}
