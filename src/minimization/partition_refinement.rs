use std::hash::Hash;

use tracing::{debug, trace};

use crate::{
    math::{Map, Partition},
    naming::CanonicalNamer,
    prelude::*,
    Output, State,
};

/// Groups the states of `ts` by `key`, naming the groups `a1`, `a2`, ... in the order in
/// which they are first encountered when going through the states in declaration order.
fn initial_partition<Ts, K, F>(ts: &Ts, key: F) -> Partition
where
    Ts: TransitionSystem,
    K: Hash + Eq,
    F: Fn(&State) -> K,
{
    let mut namer = CanonicalNamer::classes();
    Partition::new(
        ts.states()
            .iter()
            .map(|q| (q.clone(), namer.name(key(q)).clone())),
    )
}

/// Splits every class of `partition` according to the classes the successors of its members
/// belong to, until the number of classes no longer changes. As each step only ever splits
/// classes, an unchanged count means the partition is stable.
fn refine<Ts: TransitionSystem>(ts: &Ts, mut partition: Partition) -> Partition {
    let mut iteration = 0;
    loop {
        iteration += 1;
        let mut namer = CanonicalNamer::classes();
        let refined = Partition::new(ts.states().iter().map(|q| {
            let class = partition
                .class_of(q)
                .expect("every reachable state is classified")
                .clone();
            let signature: Vec<Option<State>> = ts
                .alphabet()
                .universe()
                .map(|sym| {
                    ts.successor(q, sym)
                        .and_then(|p| partition.class_of(p))
                        .cloned()
                })
                .collect();
            (q.clone(), namer.name((class, signature)).clone())
        }));

        trace!(
            "refinement iteration {iteration} went from {} to {} classes",
            partition.size(),
            refined.size()
        );
        if refined.size() == partition.size() {
            debug!(
                "partition refinement converged after {iteration} iterations with {} classes",
                refined.size()
            );
            return refined;
        }
        partition = refined;
    }
}

/// Computes the partition of the states of a moore machine into equivalence classes, starting
/// from the grouping by state output.
pub(crate) fn moore_partition_refinement(mm: &MooreMachine) -> Partition {
    let initial = initial_partition(mm, |q| mm.output(q).cloned());
    trace!("initial moore partition has {} classes", initial.size());
    refine(mm, initial)
}

/// Computes the partition of the states of a mealy machine into equivalence classes, starting
/// from the grouping by the outputs a state emits on each symbol.
pub(crate) fn mealy_partition_refinement(mm: &MealyMachine) -> Partition {
    let initial = initial_partition(mm, |q| {
        mm.alphabet()
            .universe()
            .map(|sym| mm.transition(sym, q).map(|e| e.output.clone()))
            .collect::<Vec<Option<Output>>>()
    });
    trace!("initial mealy partition has {} classes", initial.size());
    refine(mm, initial)
}

/// Rewrites the transitions of `ts` over class names. If several members of a class have a
/// transition on the same symbol, the one of the member declared first is kept.
fn quotient_transitions<Ts, E, F>(ts: &Ts, partition: &Partition, relabel: F) -> TransitionTable<E>
where
    Ts: TransitionSystem,
    F: Fn(&Ts::Edge, State) -> E,
{
    let mut table = TransitionTable::default();
    for sym in ts.alphabet().universe() {
        for q in ts.states() {
            let Some(edge) = ts.edge(q, sym) else {
                continue;
            };
            let class = partition.class_of(q).expect("state is classified");
            let target = partition
                .class_of(edge.target())
                .expect("target is classified")
                .clone();
            table.insert_if_vacant(sym, class, relabel(edge, target));
        }
    }
    table
}

/// Collapses `mm` to one state per class of `partition`.
pub(crate) fn moore_quotient(mm: &MooreMachine, partition: &Partition) -> MooreMachine {
    let states: Vec<State> = partition.classes().cloned().collect();
    let mut outputs: Map<State, Output> = Map::with_capacity(states.len());
    for (q, class) in partition.iter() {
        if let Some(o) = mm.output(q) {
            outputs.entry(class.clone()).or_insert_with(|| o.clone());
        }
    }
    let transitions = quotient_transitions(mm, partition, |_, target| target);
    debug!(
        "minimized moore machine from {} to {} states",
        mm.size(),
        states.len()
    );
    MooreMachine::from_parts(states, mm.alphabet().clone(), transitions, outputs)
}

/// Collapses `mm` to one state per class of `partition`.
pub(crate) fn mealy_quotient(mm: &MealyMachine, partition: &Partition) -> MealyMachine {
    let states: Vec<State> = partition.classes().cloned().collect();
    let transitions = quotient_transitions(mm, partition, |edge: &MealyEdge, target| {
        MealyEdge::new(edge.output.clone(), target)
    });
    debug!(
        "minimized mealy machine from {} to {} states",
        mm.size(),
        states.len()
    );
    MealyMachine::from_parts(states, mm.alphabet().clone(), transitions)
}
