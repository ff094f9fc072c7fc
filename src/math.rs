use crate::id::StateId;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Maps a source state and a symbol to the target of the transition, borrowing from the automaton.
pub type TransitionTable<'a> = Map<(&'a str, char), &'a StateId>;
