use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use crate::prelude::*;

/// The reasons for which a run can stop before the verdict is known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunFailure {
    /// The input contains symbols that are not part of the alphabet, listed once each in order
    /// of first appearance. This is detected before any transition is taken.
    #[error("Invalid symbols in input: {}", .0.iter().join(", "))]
    InvalidSymbols(Vec<char>),
    /// The automaton has no transition for `symbol` in `state`.
    #[error("No transition from state {state} on symbol '{symbol}'")]
    MissingTransition {
        /// The state in which the run got stuck.
        state: StateId,
        /// The symbol that could not be read.
        symbol: char,
    },
}

/// How a run on some input ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input was consumed entirely and the reached state is accepting.
    Accepted,
    /// The input was consumed entirely but the reached state is not accepting. This is a regular
    /// negative verdict and not an error.
    Rejected {
        /// The non-accepting state the run ended in.
        state: StateId,
    },
    /// The run could not be completed.
    Failed(RunFailure),
}

/// The result of running an input on a [`Dfa`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the input is accepted.
    pub accepted: bool,
    /// The input that was run.
    pub input: String,
    /// Visited states, starting with the initial one. Has one entry more than the number of
    /// consumed symbols, and is empty if the input contains invalid symbols.
    pub path: Vec<StateId>,
    /// The last state that was reached.
    pub current_state: StateId,
    /// The part of the input that was not consumed, empty if the whole input was read.
    pub remaining_input: String,
    /// Distinguishes acceptance, rejection and failure.
    pub outcome: Outcome,
}

impl ExecutionResult {
    /// Returns a human readable reason for a negative result, or `None` if the input was accepted.
    pub fn failure_message(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Accepted => None,
            Outcome::Rejected { state } => Some(format!("Ended in non-accepting state {state}")),
            Outcome::Failed(failure) => Some(failure.to_string()),
        }
    }

    /// Returns the failure that stopped the run, if any. A rejection is not a failure.
    pub fn failure(&self) -> Option<&RunFailure> {
        match &self.outcome {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// One point in the trace of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationStep {
    /// The state at this point.
    pub state: StateId,
    /// The symbol that was just read to arrive here, `None` for the initial step.
    pub symbol: Option<char>,
    /// What is left of the input.
    pub remaining: String,
    /// Zero based position of the step in the trace.
    pub index: usize,
}

/// Why a [`Simulation`] stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The input was consumed entirely.
    Completed {
        /// Whether the reached state is accepting.
        accepted: bool,
    },
    /// The run was cut short.
    Failed(RunFailure),
}

/// A trace of steps together with the reason it ends where it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    /// The steps, always starting with the initial one.
    pub steps: Vec<SimulationStep>,
    /// Why the trace ends.
    pub halt: Halt,
}

impl Simulation {
    /// Returns true if the input was consumed and accepted.
    pub fn accepted(&self) -> bool {
        matches!(self.halt, Halt::Completed { accepted: true })
    }
}

/// Runs inputs on a borrowed [`Dfa`]. Construction indexes the transitions by source state and
/// symbol once, afterwards each call is a single pass over the input that does not modify anything.
///
/// If the automaton has several transitions for the same state and symbol, the one that comes
/// first in [`Dfa::transitions`] is used.
#[derive(Debug, Clone)]
pub struct Executor<'a> {
    dfa: &'a Dfa,
    symbols: math::Set<char>,
    table: math::TransitionTable<'a>,
}

impl<'a> Executor<'a> {
    /// Creates an executor for `dfa`.
    pub fn new(dfa: &'a Dfa) -> Self {
        let mut table = math::TransitionTable::default();
        for t in &dfa.transitions {
            table.entry((t.from.as_str(), t.symbol)).or_insert(&t.to);
        }
        Self {
            dfa,
            symbols: dfa.alphabet.symbol_set(),
            table,
        }
    }

    /// The automaton this executor runs.
    pub fn dfa(&self) -> &'a Dfa {
        self.dfa
    }

    /// Returns the target of the transition leaving `state` on `symbol`, or `None` if there is none.
    pub fn next_state(&self, state: &str, symbol: char) -> Option<&'a StateId> {
        self.table.get(&(state, symbol)).copied()
    }

    /// Returns the symbols of `input` that are not in the alphabet, each one once and in order
    /// of first appearance.
    pub fn find_invalid_symbols(&self, input: &str) -> Vec<char> {
        input
            .chars()
            .filter(|sym| !self.symbols.contains(sym))
            .unique()
            .collect()
    }

    /// Returns true if every symbol of `input` is in the alphabet.
    pub fn is_valid_string(&self, input: &str) -> bool {
        self.find_invalid_symbols(input).is_empty()
    }

    /// Starts a lazy run of `input` from the initial state, see [`Run`].
    pub fn run<'w>(&self, input: &'w str) -> Run<'_, 'w> {
        Run {
            executor: self,
            state: &self.dfa.initial,
            rest: input,
            index: 0,
            started: false,
            failure: None,
        }
    }

    /// Runs `input` and computes the verdict along with the visited path.
    ///
    /// Inputs with symbols outside of the alphabet are refused before any transition is taken.
    /// If a transition is missing along the way, the run stops there and the path up to that
    /// point is kept.
    pub fn process(&self, input: &str) -> ExecutionResult {
        let invalid = self.find_invalid_symbols(input);
        if !invalid.is_empty() {
            debug!("refusing input {input:?}, it contains invalid symbols {invalid:?}");
            return ExecutionResult {
                accepted: false,
                input: input.to_string(),
                path: vec![],
                current_state: self.dfa.initial.clone(),
                remaining_input: input.to_string(),
                outcome: Outcome::Failed(RunFailure::InvalidSymbols(invalid)),
            };
        }

        let mut run = self.run(input);
        let path = run.by_ref().map(|step| step.state).collect_vec();
        let current_state = run.state().clone();
        let remaining_input = run.remaining().to_string();

        let outcome = match run.into_failure() {
            Some(failure) => Outcome::Failed(failure),
            None if self.dfa.is_accepting(&current_state) => Outcome::Accepted,
            None => Outcome::Rejected {
                state: current_state.clone(),
            },
        };
        debug!("ran {input:?} to {current_state}, outcome {outcome:?}");

        ExecutionResult {
            accepted: outcome == Outcome::Accepted,
            input: input.to_string(),
            path,
            current_state,
            remaining_input,
            outcome,
        }
    }

    /// Produces the run on `input` as a sequence of steps, starting with the initial state.
    ///
    /// The sequence silently ends at the first symbol for which no transition exists. There is
    /// no check against the alphabet, so an unknown symbol ends the sequence just like a missing
    /// transition does. Use [`Executor::simulate`] to learn why a trace ends.
    pub fn simulation_steps(&self, input: &str) -> Vec<SimulationStep> {
        self.run(input).collect()
    }

    /// Like [`Executor::simulation_steps`], but reports why the trace ends. Symbols outside of
    /// the alphabet are rejected up front as in [`Executor::process`], the trace then only
    /// consists of the initial step.
    pub fn simulate(&self, input: &str) -> Simulation {
        let invalid = self.find_invalid_symbols(input);
        if !invalid.is_empty() {
            let steps = self.run(input).take(1).collect();
            return Simulation {
                steps,
                halt: Halt::Failed(RunFailure::InvalidSymbols(invalid)),
            };
        }

        let mut run = self.run(input);
        let steps = run.by_ref().collect_vec();
        let accepted = self.dfa.is_accepting(run.state());
        let halt = match run.into_failure() {
            Some(failure) => Halt::Failed(failure),
            None => Halt::Completed { accepted },
        };
        Simulation { steps, halt }
    }
}

/// A lazy run of a word, yielding one [`SimulationStep`] per visited state. The first item is
/// the initial state. The iterator ends once the word is consumed or a transition is missing,
/// which can be told apart afterwards through [`Run::failure`].
#[derive(Debug, Clone)]
pub struct Run<'e, 'w> {
    executor: &'e Executor<'e>,
    state: &'e StateId,
    rest: &'w str,
    index: usize,
    started: bool,
    failure: Option<RunFailure>,
}

impl<'e, 'w> Run<'e, 'w> {
    /// The state that was reached last.
    pub fn state(&self) -> &'e StateId {
        self.state
    }

    /// The part of the input that has not been consumed.
    pub fn remaining(&self) -> &'w str {
        self.rest
    }

    /// The reason the run stopped early, if it did.
    pub fn failure(&self) -> Option<&RunFailure> {
        self.failure.as_ref()
    }

    fn into_failure(self) -> Option<RunFailure> {
        self.failure
    }

    fn snapshot(&self, symbol: Option<char>) -> SimulationStep {
        SimulationStep {
            state: self.state.clone(),
            symbol,
            remaining: self.rest.to_string(),
            index: self.index,
        }
    }
}

impl<'e, 'w> Iterator for Run<'e, 'w> {
    type Item = SimulationStep;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.snapshot(None));
        }
        if self.failure.is_some() {
            return None;
        }

        let mut chars = self.rest.chars();
        let symbol = chars.next()?;
        match self.executor.next_state(self.state, symbol) {
            Some(target) => {
                trace!("{} --{symbol}--> {target}", self.state);
                self.state = target;
                self.rest = chars.as_str();
                self.index += 1;
                Some(self.snapshot(Some(symbol)))
            }
            None => {
                trace!("no transition from {} on {symbol}", self.state);
                self.failure = Some(RunFailure::MissingTransition {
                    state: self.state.clone(),
                    symbol,
                });
                None
            }
        }
    }
}

impl Dfa {
    /// Creates an [`Executor`] for `self`.
    pub fn executor(&self) -> Executor<'_> {
        Executor::new(self)
    }

    /// Returns true if `input` is accepted, see [`Executor::process`].
    pub fn accepts(&self, input: &str) -> bool {
        self.process(input).accepted
    }

    /// See [`Executor::process`].
    pub fn process(&self, input: &str) -> ExecutionResult {
        self.executor().process(input)
    }

    /// See [`Executor::simulation_steps`].
    pub fn simulation_steps(&self, input: &str) -> Vec<SimulationStep> {
        self.executor().simulation_steps(input)
    }

    /// See [`Executor::simulate`].
    pub fn simulate(&self, input: &str) -> Simulation {
        self.executor().simulate(input)
    }
}
