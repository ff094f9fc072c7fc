use crate::prelude::*;

/// Helper struct for the construction of a [`Dfa`]. It collects an alphabet, states, edges and
/// accepting states and assembles them once the initial state is known.
///
/// By default, every state that is mentioned by an edge, by the accepting set or as the initial
/// state is created on the fly (with its identifier as label), in order of first mention after
/// the explicitly declared states. Calling [`DfaBuilder::strict`] disables this, which allows
/// building automata with dangling references, e.g. to exercise the validator. If no alphabet
/// is given, it consists of the edge symbols in order of first use.
///
/// # Example
///
/// We want to create a DFA over the alphabet `['a', 'b']` with two states `p` and `q`, where `p`
/// is initial and `q` is accepting and reading `b` toggles between them.
/// ```
/// use dfa_sim::prelude::*;
///
/// let dfa = DfaBuilder::new("odd b")
///     .with_transitions([("p", 'a', "p"), ("p", 'b', "q"), ("q", 'a', "q"), ("q", 'b', "p")])
///     .with_accepting(["q"])
///     .into_dfa("p");
/// assert_eq!(dfa.size(), 2);
/// assert!(!dfa.accepts("abab"));
/// assert!(dfa.accepts("bbb"));
/// assert!(dfa.accepts("ab"));
/// ```
pub struct DfaBuilder {
    id: Option<String>,
    name: String,
    description: Option<String>,
    alphabet: Option<CharAlphabet>,
    states: Vec<State>,
    edges: Vec<(StateId, char, StateId)>,
    accepting: Vec<StateId>,
    ids: Box<dyn IdSource>,
    strict: bool,
}

impl DfaBuilder {
    /// Creates an empty builder for an automaton with the given name. Transition identifiers
    /// are drawn from a [`SequentialIds`] unless [`DfaBuilder::with_id_source`] is used.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            alphabet: None,
            states: vec![],
            edges: vec![],
            accepting: vec![],
            ids: Box::new(SequentialIds::default()),
            strict: false,
        }
    }

    /// Sets the identifier of the automaton, it defaults to the name.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the alphabet.
    pub fn with_alphabet(mut self, alphabet: impl Into<CharAlphabet>) -> Self {
        self.alphabet = Some(alphabet.into());
        self
    }

    /// Declares states by identifier, in the given order.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.states
            .extend(states.into_iter().map(State::new));
        self
    }

    /// Declares a single state with a label that differs from its identifier.
    pub fn with_labelled_state(
        mut self,
        id: impl Into<StateId>,
        label: impl Into<String>,
        position: Position,
    ) -> Self {
        self.states
            .push(State::new(id).with_label(label).with_position(position));
        self
    }

    /// Adds edges given as `(from, symbol, to)` triples.
    pub fn with_transitions<I, S, T>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (S, char, T)>,
        S: Into<StateId>,
        T: Into<StateId>,
    {
        self.edges.extend(
            edges
                .into_iter()
                .map(|(from, sym, to)| (from.into(), sym, to.into())),
        );
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I, S>(mut self, accepting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.accepting
            .extend(accepting.into_iter().map(Into::into));
        self
    }

    /// Uses `ids` to generate transition identifiers.
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Only the explicitly declared states are created.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Assembles the automaton with `initial` as initial state.
    pub fn into_dfa(mut self, initial: impl Into<StateId>) -> Dfa {
        let initial = initial.into();

        let mut states = std::mem::take(&mut self.states);
        if !self.strict {
            let mentioned = std::iter::once(&initial)
                .chain(self.edges.iter().flat_map(|(from, _, to)| [from, to]))
                .chain(self.accepting.iter());
            for id in mentioned {
                if !states.iter().any(|q| q.id == *id) {
                    states.push(State::new(id.clone()));
                }
            }
        }

        let alphabet = self.alphabet.take().unwrap_or_else(|| {
            self.edges
                .iter()
                .map(|(_, sym, _)| *sym)
                .collect::<CharAlphabet>()
                .unique_symbols()
                .collect()
        });

        let transitions = self
            .edges
            .into_iter()
            .map(|(from, symbol, to)| Transition {
                id: generate_transition_id(&mut self.ids),
                from,
                to,
                symbol,
            })
            .collect();

        Dfa {
            id: self.id.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            description: self.description,
            alphabet,
            states,
            transitions,
            initial,
            accepting: self.accepting,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn lenient_builder_creates_mentioned_states() {
        let dfa = DfaBuilder::new("d")
            .with_states(["a"])
            .with_transitions([("a", 'x', "b"), ("b", 'y', "c")])
            .with_accepting(["d"])
            .into_dfa("a");
        assert_eq!(dfa.state_ids().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(dfa.alphabet, CharAlphabet::from("xy"));
        assert_eq!(
            dfa.transitions.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["t0", "t1"]
        );
        assert_eq!(dfa.id, "d");
    }

    #[test]
    fn toggling_on_b_accepts_odd_counts() {
        let dfa = DfaBuilder::new("odd b")
            .with_transitions([("p", 'a', "p"), ("p", 'b', "q"), ("q", 'a', "q"), ("q", 'b', "p")])
            .with_accepting(["q"])
            .into_dfa("p");
        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("bbb"));
        assert!(!dfa.accepts("bab"));
        assert!(!dfa.accepts("abab"));
    }

    #[test]
    fn strict_builder_keeps_dangling_references() {
        let dfa = DfaBuilder::new("broken")
            .with_id("broken-1")
            .with_description("references a missing state")
            .with_alphabet("01")
            .with_labelled_state("q0", "start", Position::new(10.0, 20.0))
            .with_transitions([("q0", '0', "q9")])
            .with_id_source(SequentialIds::with_prefix("e"))
            .strict()
            .into_dfa("q0");
        assert_eq!(dfa.size(), 1);
        assert_eq!(dfa.state("q0").map(|q| q.label.as_str()), Some("start"));
        assert!(!dfa.contains_state("q9"));
        assert_eq!(dfa.transitions[0].id, "e0");
        assert_eq!(dfa.description.as_deref(), Some("references a missing state"));
    }
}
