//! JSON import and export of [`Dfa`] definitions.
//!
//! The shape is the one used by the surrounding editor and storage layer: camel cased field
//! names, symbols as one character strings and the accepting states as a list of identifiers.
//! Fields that older exports put on states (`isInitial`, `isAccepting`) are ignored on import,
//! the automaton level fields are authoritative.
use thiserror::Error;

use crate::prelude::*;

/// Errors that occur while reading or writing a [`Dfa`] definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The JSON could not be parsed or does not describe an automaton.
    #[error("could not decode automaton definition: {0}")]
    Decode(#[source] serde_json::Error),
    /// The automaton could not be encoded.
    #[error("could not encode automaton definition: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Dfa {
    /// Reads an automaton from its JSON definition.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(DefinitionError::Decode)
    }

    /// Writes the automaton as pretty printed JSON.
    pub fn to_json(&self) -> Result<String, DefinitionError> {
        serde_json::to_string_pretty(self).map_err(DefinitionError::Encode)
    }
}

fn single_char<E: serde::de::Error>(s: &str) -> Result<char, E> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(E::custom(format!(
            "a symbol must be exactly one character, got {s:?}"
        ))),
    }
}

/// (De)serializes a single symbol as a one character string.
pub(crate) mod symbol {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(symbol: &char, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&*symbol.encode_utf8(&mut [0; 4]))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<char, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::single_char(&s)
    }
}

/// (De)serializes a list of symbols as a list of one character strings.
pub(crate) mod symbols {
    use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(symbols: &[char], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(symbols.len()))?;
        for symbol in symbols {
            let mut buf = [0; 4];
            seq.serialize_element(&*symbol.encode_utf8(&mut buf))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<char>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| super::single_char(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DefinitionError;
    use crate::{prelude::*, tests::ENDS_IN_01};

    const BINARY: &str = r#"{
        "id": "ends-01",
        "name": "Ends in 01",
        "alphabet": ["0", "1"],
        "states": [
            { "id": "q0", "label": "start", "isInitial": true, "isAccepting": false, "position": { "x": 100.0, "y": 50.0 } },
            { "id": "q1", "label": "q1", "isInitial": false, "isAccepting": false, "position": { "x": 200.0, "y": 50.0 } },
            { "id": "q2", "label": "q2", "isInitial": false, "isAccepting": true, "position": { "x": 300.0, "y": 50.0 } }
        ],
        "transitions": [
            { "id": "a", "from": "q0", "to": "q1", "symbol": "0" },
            { "id": "b", "from": "q0", "to": "q0", "symbol": "1" },
            { "id": "c", "from": "q1", "to": "q1", "symbol": "0" },
            { "id": "d", "from": "q1", "to": "q2", "symbol": "1" },
            { "id": "e", "from": "q2", "to": "q1", "symbol": "0" },
            { "id": "f", "from": "q2", "to": "q0", "symbol": "1" }
        ],
        "initialStateId": "q0",
        "acceptingStateIds": ["q2"]
    }"#;

    #[test]
    fn imports_editor_format() {
        let dfa = Dfa::from_json(BINARY).unwrap();
        assert_eq!(dfa.name, "Ends in 01");
        assert_eq!(dfa.description, None);
        assert_eq!(dfa.alphabet, CharAlphabet::from("01"));
        assert_eq!(dfa.state("q0").unwrap().label, "start");
        assert_eq!(dfa.state("q2").unwrap().position, Position::new(300.0, 50.0));
        assert!(dfa.accepts("1001"));
        assert!(dfa.validate().is_valid());
    }

    #[test]
    fn export_roundtrip_preserves_definition() {
        let json = ENDS_IN_01.to_json().unwrap();
        assert!(json.contains("\"initialStateId\": \"q0\""));
        assert!(json.contains("\"acceptingStateIds\""));
        assert!(!json.contains("description"));
        assert_eq!(Dfa::from_json(&json).unwrap(), *ENDS_IN_01);
    }

    #[test]
    fn rejects_multi_character_symbols() {
        let broken = BINARY.replace(r#""symbol": "0" }"#, r#""symbol": "01" }"#);
        let err = Dfa::from_json(&broken).unwrap_err();
        assert!(matches!(err, DefinitionError::Decode(_)));
        assert!(err.to_string().contains("exactly one character"));

        let broken = BINARY.replace(r#"["0", "1"]"#, r#"["0", ""]"#);
        assert!(Dfa::from_json(&broken).is_err());
    }
}
