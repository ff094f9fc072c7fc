use std::{borrow::Borrow, fmt::Debug, ops::Deref};

use crate::{automaton::State, math::Set};

macro_rules! string_id_type {
    ($($(#[$meta:meta])* $name:ident),*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
            #[cfg_attr(
                feature = "serde",
                derive(serde::Serialize, serde::Deserialize),
                serde(transparent)
            )]
            pub struct $name(pub String);

            impl $name {
                /// Creates a new identifier from anything that converts into a `String`.
                pub fn new(id: impl Into<String>) -> Self {
                    Self(id.into())
                }

                /// Returns the identifier as a string slice.
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl Deref for $name {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl Borrow<str> for $name {
                fn borrow(&self) -> &str {
                    &self.0
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl From<&$name> for $name {
                fn from(value: &$name) -> Self {
                    value.clone()
                }
            }

            impl PartialEq<str> for $name {
                fn eq(&self, other: &str) -> bool {
                    self.0 == other
                }
            }

            impl PartialEq<&str> for $name {
                fn eq(&self, other: &&str) -> bool {
                    self.0 == *other
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl Debug for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    }
}

string_id_type!(
    /// Identifies a state. It is stable for the lifetime of an automaton and independent
    /// of the label that is displayed for the state.
    StateId,
    /// Identifies a transition.
    TransitionId
);

/// A source of fresh unique tokens, used whenever a transition needs an identifier.
///
/// Only uniqueness is part of the contract, the format of the tokens is up to the implementation.
pub trait IdSource {
    /// Produces a token that has not been handed out before.
    fn fresh(&mut self) -> String;
}

impl<I: IdSource + ?Sized> IdSource for &mut I {
    fn fresh(&mut self) -> String {
        (**self).fresh()
    }
}

impl<I: IdSource + ?Sized> IdSource for Box<I> {
    fn fresh(&mut self) -> String {
        (**self).fresh()
    }
}

/// Produces random 128 bit tokens, rendered as hex digits with a `t_` prefix.
#[cfg(feature = "random")]
#[derive(Debug, Clone)]
pub struct RandomIds(fastrand::Rng);

#[cfg(feature = "random")]
impl RandomIds {
    /// Creates a source that is seeded from the process-wide generator.
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    /// Creates a source with a fixed seed, which yields a reproducible sequence of tokens.
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

#[cfg(feature = "random")]
impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "random")]
impl IdSource for RandomIds {
    fn fresh(&mut self) -> String {
        format!("t_{:032x}", self.0.u128(..))
    }
}

/// Deterministic source that counts upwards, producing `t0`, `t1`, ... by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    /// Creates a counter that prefixes every token with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::with_prefix("t")
    }
}

impl IdSource for SequentialIds {
    fn fresh(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Produces an identifier `q<N>` that is not used by any of the `existing` states. The search
/// starts with `N` being the number of existing states and counts upwards.
pub fn generate_state_id(existing: &[State]) -> StateId {
    let used: Set<&str> = existing.iter().map(|q| q.id.as_str()).collect();
    let mut n = existing.len();
    loop {
        let candidate = format!("q{n}");
        if !used.contains(candidate.as_str()) {
            return StateId(candidate);
        }
        n += 1;
    }
}

/// Draws a fresh transition identifier from the given source.
pub fn generate_transition_id<I: IdSource + ?Sized>(source: &mut I) -> TransitionId {
    TransitionId(source.fresh())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::State;

    #[test]
    fn state_ids_start_at_count_and_skip_taken() {
        assert_eq!(generate_state_id(&[]), "q0");

        let states = vec![State::new("q0"), State::new("q1")];
        assert_eq!(generate_state_id(&states), "q2");

        let states = vec![State::new("q2"), State::new("q3"), State::new("x")];
        assert_eq!(generate_state_id(&states), "q4");
    }

    #[test]
    fn sequential_ids_are_deterministic() {
        let mut ids = SequentialIds::default();
        assert_eq!(generate_transition_id(&mut ids), "t0");
        assert_eq!(generate_transition_id(&mut ids), "t1");

        let mut edges = SequentialIds::with_prefix("e");
        assert_eq!(edges.fresh(), "e0");
    }

    #[cfg(feature = "random")]
    #[test]
    fn random_ids_do_not_repeat() {
        let mut ids = RandomIds::with_seed(7);
        let drawn: Set<String> = (0..1000).map(|_| ids.fresh()).collect();
        assert_eq!(drawn.len(), 1000);
        assert!(drawn.iter().all(|id| id.len() == 34 && id.starts_with("t_")));
    }
}
