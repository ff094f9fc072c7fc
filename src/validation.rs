use thiserror::Error;
use tracing::{debug, trace};

use crate::prelude::*;

/// A structural defect that makes a [`Dfa`] malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("DFA must have at least one state")]
    NoStates,
    #[error("Initial state '{0}' does not exist")]
    UnknownInitialState(StateId),
    #[error("Accepting state '{0}' does not exist")]
    UnknownAcceptingState(StateId),
    #[error("Duplicate state id '{0}'")]
    DuplicateState(StateId),
    #[error("Transition {transition} starts in non-existent state '{state}'")]
    UnknownSourceState {
        transition: TransitionId,
        state: StateId,
    },
    #[error("Transition {transition} leads to non-existent state '{state}'")]
    UnknownTargetState {
        transition: TransitionId,
        state: StateId,
    },
    #[error("Transition {transition} uses symbol '{symbol}' which is not in the alphabet")]
    SymbolNotInAlphabet {
        transition: TransitionId,
        symbol: char,
    },
    #[error("Non-deterministic transitions from state {state} on symbol '{symbol}' (to {kept} and {conflicting})")]
    Nondeterministic {
        state: StateId,
        symbol: char,
        kept: StateId,
        conflicting: StateId,
    },
}

/// A finding that leaves the [`Dfa`] usable but incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationWarning {
    #[error("Alphabet is empty, the automaton accepts at most the empty string")]
    EmptyAlphabet,
    #[error("Missing transition from state {state} on symbol '{symbol}'")]
    MissingTransition { state: StateId, symbol: char },
}

/// The outcome of [`validate`]. Errors make the automaton invalid, warnings do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Fatal findings in the order they were encountered.
    pub errors: Vec<ValidationError>,
    /// Non-fatal findings in the order they were encountered.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Returns true if no errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The errors as human readable messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// The warnings as human readable messages.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    fn error(&mut self, error: ValidationError) {
        trace!("validation error: {error}");
        self.errors.push(error);
    }

    fn warning(&mut self, warning: ValidationWarning) {
        trace!("validation warning: {warning}");
        self.warnings.push(warning);
    }
}

/// Audits the structure of `dfa`. Every check runs regardless of what the others find:
///
/// 1. there is at least one state,
/// 2. the initial state exists,
/// 3. every accepting state exists,
/// 4. the alphabet is not empty (warning),
/// 5. state identifiers are unique,
/// 6. transitions start and end in existing states,
/// 7. transition symbols are in the alphabet,
/// 8. no two transitions leave the same state on the same symbol,
/// 9. every state has a transition for every symbol (warning).
///
/// For check 8 the first transition for a state and symbol is the one that counts, every later
/// one is reported against it.
pub fn validate(dfa: &Dfa) -> ValidationReport {
    let mut report = ValidationReport::default();
    let known: math::Set<&str> = dfa.state_ids().map(|q| q.as_str()).collect();

    if dfa.states.is_empty() {
        report.error(ValidationError::NoStates);
    }

    if !known.contains(dfa.initial.as_str()) {
        report.error(ValidationError::UnknownInitialState(dfa.initial.clone()));
    }

    for q in dfa.accepting.iter().filter(|q| !known.contains(q.as_str())) {
        report.error(ValidationError::UnknownAcceptingState(q.clone()));
    }

    if dfa.alphabet.is_empty() {
        report.warning(ValidationWarning::EmptyAlphabet);
    }

    let mut seen = math::Set::default();
    for q in dfa.state_ids() {
        if !seen.insert(q.as_str()) {
            report.error(ValidationError::DuplicateState(q.clone()));
        }
    }

    let symbols = dfa.alphabet.symbol_set();
    let mut targets: math::Map<(&StateId, char), &StateId> = math::Map::default();
    for t in &dfa.transitions {
        if !known.contains(t.from.as_str()) {
            report.error(ValidationError::UnknownSourceState {
                transition: t.id.clone(),
                state: t.from.clone(),
            });
        }
        if !known.contains(t.to.as_str()) {
            report.error(ValidationError::UnknownTargetState {
                transition: t.id.clone(),
                state: t.to.clone(),
            });
        }
        if !symbols.contains(&t.symbol) {
            report.error(ValidationError::SymbolNotInAlphabet {
                transition: t.id.clone(),
                symbol: t.symbol,
            });
        }
        match targets.get(&(&t.from, t.symbol)) {
            Some(kept) => report.error(ValidationError::Nondeterministic {
                state: t.from.clone(),
                symbol: t.symbol,
                kept: (*kept).clone(),
                conflicting: t.to.clone(),
            }),
            None => {
                targets.insert((&t.from, t.symbol), &t.to);
            }
        }
    }

    let mut checked = math::Set::default();
    for q in dfa.state_ids().filter(|q| checked.insert(q.as_str())) {
        for symbol in dfa.alphabet.unique_symbols() {
            if !targets.contains_key(&(q, symbol)) {
                report.warning(ValidationWarning::MissingTransition {
                    state: q.clone(),
                    symbol,
                });
            }
        }
    }

    debug!(
        "validated {}: {} errors, {} warnings",
        dfa.name,
        report.errors.len(),
        report.warnings.len()
    );
    report
}

impl Dfa {
    /// Audits the structure of `self`, see [`validate`].
    pub fn validate(&self) -> ValidationReport {
        validate(self)
    }
}
