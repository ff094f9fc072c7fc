use crate::prelude::*;

mod builder;
pub use builder::DfaBuilder;

/// Where a state is drawn. This has no influence on running or validating an automaton and
/// is only carried along for whoever renders it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single state of a [`Dfa`].
///
/// Whether a state is initial or accepting is not stored here, it is a property of the
/// automaton the state belongs to, see [`Dfa::is_initial`] and [`Dfa::is_accepting`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    /// Unique identifier of the state.
    pub id: StateId,
    /// Free text that is displayed for the state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    /// Display position.
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Position,
}

impl State {
    /// Creates a state whose label coincides with its identifier.
    pub fn new(id: impl Into<StateId>) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            id,
            position: Position::default(),
        }
    }

    /// Replaces the label of the state.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replaces the position of the state.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// An edge `from --symbol--> to`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Unique identifier of the transition.
    pub id: TransitionId,
    /// Source state.
    pub from: StateId,
    /// Target state.
    pub to: StateId,
    /// The single symbol that triggers the transition.
    #[cfg_attr(feature = "serde", serde(with = "crate::serialization::symbol"))]
    pub symbol: char,
}

impl Transition {
    /// Creates a new transition.
    pub fn new(
        id: impl Into<TransitionId>,
        from: impl Into<StateId>,
        symbol: char,
        to: impl Into<StateId>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            symbol,
        }
    }
}

/// A deterministic finite automaton, that is an alphabet, a collection of states, a collection
/// of transitions, a designated initial state and a set of accepting states.
///
/// The definition is plain data. Nothing in this crate mutates it while running or validating
/// it, and it may well be malformed: states are kept in a sequence so that duplicate identifiers
/// survive until [`Dfa::validate`] reports them. The accepting identifiers are the only source
/// of truth for whether a state accepts.
///
/// # Example
/// ```
/// use dfa_sim::prelude::*;
///
/// let dfa = DfaBuilder::new("even zeros")
///     .with_alphabet("01")
///     .with_transitions([("e", '0', "o"), ("e", '1', "e"), ("o", '0', "e"), ("o", '1', "o")])
///     .with_accepting(["e"])
///     .into_dfa("e");
/// assert!(dfa.accepts("1001"));
/// assert!(!dfa.accepts("10"));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Dfa {
    /// Identifier of the automaton.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Optional description.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    /// The input alphabet.
    pub alphabet: CharAlphabet,
    /// All states, identifiers are supposed to be unique.
    pub states: Vec<State>,
    /// All transitions.
    pub transitions: Vec<Transition>,
    /// Identifier of the initial state.
    #[cfg_attr(feature = "serde", serde(rename = "initialStateId"))]
    pub initial: StateId,
    /// Identifiers of the accepting states.
    #[cfg_attr(feature = "serde", serde(rename = "acceptingStateIds", default))]
    pub accepting: Vec<StateId>,
}

impl Dfa {
    /// Returns the identifier of the initial state.
    pub fn initial(&self) -> &StateId {
        &self.initial
    }

    /// The number of states, duplicates included.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the first state with the given identifier, if any.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|q| q.id == *id)
    }

    /// Returns true if a state with identifier `id` exists.
    pub fn contains_state(&self, id: &str) -> bool {
        self.state(id).is_some()
    }

    /// Iterates over the identifiers of all states in order.
    pub fn state_ids(&self) -> impl Iterator<Item = &StateId> + '_ {
        self.states.iter().map(|q| &q.id)
    }

    /// Iterates over all transitions leaving the state `id`.
    pub fn transitions_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.iter().filter(move |t| t.from == *id)
    }

    /// Returns true if `id` is the initial state.
    pub fn is_initial(&self, id: &str) -> bool {
        self.initial == *id
    }

    /// Returns true if `id` is among the accepting states.
    pub fn is_accepting(&self, id: &str) -> bool {
        self.accepting.iter().any(|q| q == id)
    }

    /// Returns the identifiers of all states that are accepting.
    pub fn accepting_states(&self) -> impl Iterator<Item = &StateId> + '_ {
        self.state_ids().filter(|q| self.is_accepting(q))
    }

    /// Returns the identifiers of all states that are rejecting.
    pub fn rejecting_states(&self) -> impl Iterator<Item = &StateId> + '_ {
        self.state_ids().filter(|q| !self.is_accepting(q))
    }

    /// Adds a new state with a freshly generated identifier and returns that identifier.
    pub fn add_state(&mut self, label: Option<String>, position: Position) -> StateId {
        let id = generate_state_id(&self.states);
        let state = State::new(id.clone()).with_position(position);
        self.states.push(match label {
            Some(label) => state.with_label(label),
            None => state,
        });
        id
    }

    /// Removes the state `id` together with every transition touching it and its entry in the
    /// accepting set. Returns the removed state. The initial state identifier is left as is, so
    /// removing the initial state leaves a dangling reference that validation reports.
    pub fn remove_state(&mut self, id: &str) -> Option<State> {
        let pos = self.states.iter().position(|q| q.id == *id)?;
        let removed = self.states.remove(pos);
        self.transitions.retain(|t| t.from != *id && t.to != *id);
        self.accepting.retain(|q| q != id);
        Some(removed)
    }

    /// Adds the transition `from --symbol--> to` with an identifier drawn from `ids`.
    pub fn add_transition<I: IdSource + ?Sized>(
        &mut self,
        from: impl Into<StateId>,
        symbol: char,
        to: impl Into<StateId>,
        ids: &mut I,
    ) -> TransitionId {
        let id = generate_transition_id(ids);
        self.transitions
            .push(Transition::new(id.clone(), from, symbol, to));
        id
    }

    /// Removes the transition with identifier `id`, returning it.
    pub fn remove_transition(&mut self, id: &str) -> Option<Transition> {
        let pos = self.transitions.iter().position(|t| t.id == *id)?;
        Some(self.transitions.remove(pos))
    }

    /// Marks the state `id` as accepting or rejecting.
    pub fn set_accepting(&mut self, id: impl Into<StateId>, accepting: bool) {
        let id = id.into();
        self.accepting.retain(|q| *q != id);
        if accepting {
            self.accepting.push(id);
        }
    }

    /// Makes `id` the initial state.
    pub fn set_initial(&mut self, id: impl Into<StateId>) {
        self.initial = id.into();
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::ends_in_01};

    #[test]
    fn derived_flags() {
        let dfa = ends_in_01();
        assert!(dfa.is_initial("q0"));
        assert!(!dfa.is_initial("q1"));
        assert!(dfa.is_accepting("q2"));
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec!["q2"]);
        assert_eq!(dfa.rejecting_states().count(), 2);
        assert_eq!(dfa.transitions_from("q1").count(), 2);
    }

    #[test]
    fn editing_keeps_references_consistent() {
        let mut dfa = ends_in_01();
        let mut ids = SequentialIds::with_prefix("new");

        let fresh = dfa.add_state(Some("sink".into()), Position::new(1.0, 2.0));
        assert_eq!(fresh, "q3");
        assert_eq!(dfa.state("q3").map(|q| q.label.as_str()), Some("sink"));

        let t = dfa.add_transition("q3", '0', "q3", &mut ids);
        assert_eq!(t, "new0");
        assert_eq!(dfa.transitions_from("q3").count(), 1);

        dfa.set_accepting("q3", true);
        assert!(dfa.is_accepting("q3"));
        dfa.set_accepting("q3", false);
        assert!(!dfa.is_accepting("q3"));

        let removed = dfa.remove_state("q2").expect("q2 exists");
        assert_eq!(removed.id, "q2");
        assert!(!dfa.is_accepting("q2"));
        assert!(dfa.transitions.iter().all(|t| t.from != "q2" && t.to != "q2"));
        assert!(dfa.remove_state("q2").is_none());

        assert!(dfa.remove_transition("new0").is_some());
        assert!(dfa.remove_transition("new0").is_none());

        dfa.set_initial("q1");
        assert_eq!(dfa.initial(), "q1");
    }
}
