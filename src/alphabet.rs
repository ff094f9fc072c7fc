use itertools::Itertools;

use crate::math::Set;

/// Represents an alphabet where a symbol is just a single `char`.
///
/// The symbols are kept in the order in which they were given. Only membership matters
/// for running and validating an automaton, the order is used whenever symbols are
/// enumerated (e.g. for the completeness warnings or the columns of a transition table).
/// Duplicates are tolerated but carry no meaning, use [`CharAlphabet::unique_symbols`]
/// to iterate over each symbol exactly once.
///
/// # Example
/// ```
/// use dfa_sim::prelude::*;
///
/// let alphabet = CharAlphabet::from("01");
/// assert!(alphabet.contains('0'));
/// assert!(!alphabet.contains('2'));
/// assert_eq!(alphabet.size(), 2);
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CharAlphabet(
    #[cfg_attr(feature = "serde", serde(with = "crate::serialization::symbols"))] pub(crate) Vec<char>,
);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] from the given symbols, keeping their order.
    pub fn new(symbols: Vec<char>) -> Self {
        Self(symbols)
    }

    /// Builds an alphabet from an iterator over symbols, the order is preserved.
    pub fn from_symbols(symbols: impl IntoIterator<Item = char>) -> Self {
        Self(symbols.into_iter().collect())
    }

    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// Returns true if `symbol` is part of the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    /// Iterates over all symbols in the order they were given, duplicates included.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Iterates over the symbols in order of first appearance, skipping duplicates.
    pub fn unique_symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.universe().unique()
    }

    /// The number of symbols as given, duplicates included.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collects the symbols into a set for repeated membership tests.
    pub fn symbol_set(&self) -> Set<char> {
        self.universe().collect()
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        Self(value)
    }
}

impl From<&str> for CharAlphabet {
    fn from(value: &str) -> Self {
        Self(value.chars().collect())
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::from_symbols(iter)
    }
}

impl std::fmt::Display for CharAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.universe().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::CharAlphabet;

    #[test]
    fn duplicates_are_kept_but_enumerated_once() {
        let alphabet = CharAlphabet::from("abca");
        assert_eq!(alphabet.size(), 4);
        assert_eq!(alphabet.unique_symbols().collect::<String>(), "abc");
        assert_eq!(alphabet[3], 'a');
    }

    #[test]
    fn of_size_and_display() {
        let alphabet = CharAlphabet::of_size(3);
        assert_eq!(alphabet.to_string(), "{a, b, c}");
        assert!(CharAlphabet::default().is_empty());
        assert!(alphabet.symbol_set().contains(&'c'));
    }
}
