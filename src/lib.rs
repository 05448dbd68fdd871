//! Library for canonicalizing finite-state transducers in Rust.
//!
//! A transducer is a deterministic transition system over a finite alphabet of input symbols
//! which emits output. In a [`MealyMachine`](automaton::MealyMachine) every transition carries an
//! output, whereas in a [`MooreMachine`](automaton::MooreMachine) each state is assigned precisely
//! one output that is emitted whenever the state is entered. States, input symbols and outputs
//! are plain string labels, and the first declared state of a machine is its initial state.
//!
//! The crate supports three operations, each of which takes a machine by value or reference and
//! returns a new one:
//! - pruning, which removes the states that cannot be reached from the initial state,
//! - minimization through partition refinement (feature `minimize`), which merges states that
//!   are indistinguishable and names the resulting classes `a1`, `a2`, ...,
//! - conversion between the two kinds of machines.
//!
//! Every name that is synthesized depends only on the declaration order of states and symbols,
//! so running an operation twice on the same machine gives identical results. The [`table`]
//! module (feature `table`) reads and writes the semicolon separated tables that machines are
//! usually exchanged in.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use transducers::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::Alphabet,
        automaton::{Automaton, AutomatonError, MachineKind, MealyMachine, MooreMachine},
        math,
        naming::CanonicalNamer,
        transition_system::{
            run::FiniteRun, witness_separation, IsEdge, MealyEdge, TransitionSystem,
            TransitionTable,
        },
    };
}

/// A state is identified by its label.
pub type State = String;
/// Input symbols are identified by their label.
pub type Symbol = String;
/// Outputs are identified by their label.
pub type Output = String;

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains the definition of input alphabets.
pub mod alphabet;

/// This module defines transition systems, reachability and runs.
pub mod transition_system;
pub use transition_system::TransitionSystem;

/// Defines Mealy and Moore machines.
pub mod automaton;

/// Deterministic naming of derived states.
pub mod naming;

mod convert;

/// Contains the partition refinement algorithm. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Reading and writing of transition tables. This is feature gated behind the `table` feature.
#[cfg(feature = "table")]
pub mod table;

mod display;
