use std::collections::VecDeque;

use tracing::trace;

use crate::{math::Set, State, Symbol};

use super::{IsEdge, TransitionSystem};

/// Explores the product of `left` and `right` breadth-first from the pair of initial
/// states and returns the first word (in length-lexicographic order with respect to the
/// alphabet of `left`, followed by symbols only `right` knows) that separates the two
/// systems. A word separates them if it leads to a pair of states for which
/// `states_differ` holds, if exactly one of the systems has a transition for its last
/// symbol, or if the two transitions taken on its last symbol satisfy `edges_differ`.
///
/// Returns `None` if no such word exists.
pub fn witness_separation<L, R, SD, ED>(
    left: &L,
    right: &R,
    states_differ: SD,
    edges_differ: ED,
) -> Option<Vec<Symbol>>
where
    L: TransitionSystem,
    R: TransitionSystem,
    SD: Fn(&State, &State) -> bool,
    ED: Fn(&L::Edge, &R::Edge) -> bool,
{
    let symbols: Vec<&Symbol> = left
        .alphabet()
        .universe()
        .chain(
            right
                .alphabet()
                .universe()
                .filter(|sym| !left.alphabet().contains(sym)),
        )
        .collect();

    let origin = (left.initial(), right.initial());
    let mut seen: Set<(&State, &State)> = Set::default();
    seen.insert(origin);
    let mut queue = VecDeque::from([(Vec::<Symbol>::new(), origin)]);

    while let Some((access, (p, q))) = queue.pop_front() {
        if states_differ(p, q) {
            trace!("states {p} and {q} differ, reached with {access:?}");
            return Some(access);
        }
        for &sym in &symbols {
            let mut extended = access.clone();
            extended.push(sym.clone());
            match (left.edge(p, sym), right.edge(q, sym)) {
                (None, None) => {}
                (Some(e), Some(f)) => {
                    if edges_differ(e, f) {
                        return Some(extended);
                    }
                    let next = (e.target(), f.target());
                    if seen.insert(next) {
                        queue.push_back((extended, next));
                    }
                }
                _ => return Some(extended),
            }
        }
    }
    None
}
