//! Library for defining, running and checking deterministic finite automata (DFA).
//!
//! A [`Dfa`] is plain data: an alphabet of single `char` symbols, a collection of states, a
//! collection of transitions, the identifier of the initial state and the identifiers of the
//! accepting states. It can be assembled with a [`DfaBuilder`], edited through a handful of
//! methods or read from JSON (feature `serde`). Nothing in this crate mutates an automaton while
//! working with it, so any number of runs and checks may share one definition.
//!
//! There are two things one can do with an automaton:
//! - run an input on it through an [`run::Executor`]. [`Dfa::process`] computes the verdict
//!   along with the visited path, while [`Dfa::simulation_steps`] and [`Dfa::simulate`] produce a
//!   step by step trace for replaying the run. Neither raises errors, a failed run is described
//!   by the returned value.
//! - audit its structure with [`validation::validate`], which reports malformed parts (e.g.
//!   dangling state references or nondeterminism) as errors and gaps in the transition
//!   function as warnings.
//!
//! The executor does not validate the automaton. Running a malformed automaton yields
//! well-formed but meaningless results, so callers that care should validate first.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_sim::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "random")]
    pub use super::id::RandomIds;
    #[cfg(feature = "serde")]
    pub use super::serialization::DefinitionError;
    pub use super::{
        alphabet::CharAlphabet,
        automaton::{Dfa, DfaBuilder, Position, State, Transition},
        id::{
            generate_state_id, generate_transition_id, IdSource, SequentialIds, StateId,
            TransitionId,
        },
        math,
        run::{
            ExecutionResult, Executor, Halt, Outcome, Run, RunFailure, Simulation, SimulationStep,
        },
        validation::{validate, ValidationError, ValidationReport, ValidationWarning},
    };
}

/// Collection types that are used throughout the crate.
pub mod math;

/// Module that contains the definition of alphabets.
pub mod alphabet;

/// Identifiers of states and transitions and the generation of fresh ones.
pub mod id;

/// Defines the automaton itself and a builder for it.
pub mod automaton;
pub use automaton::{Dfa, DfaBuilder};

/// Running words on an automaton.
pub mod run;

/// Structural checks of an automaton.
pub mod validation;

mod table;

/// JSON import and export, gated behind the `serde` feature.
#[cfg(feature = "serde")]
pub mod serialization;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Binary DFA accepting exactly the words that end in `01`.
    pub fn ends_in_01() -> Dfa {
        DfaBuilder::new("ends in 01")
            .with_alphabet("01")
            .with_states(["q0", "q1", "q2"])
            .with_transitions([
                ("q0", '0', "q1"),
                ("q0", '1', "q0"),
                ("q1", '0', "q1"),
                ("q1", '1', "q2"),
                ("q2", '0', "q1"),
                ("q2", '1', "q0"),
            ])
            .with_accepting(["q2"])
            .into_dfa("q0")
    }

    lazy_static::lazy_static! {
        pub static ref ENDS_IN_01: Dfa = ends_in_01();
    }
}
