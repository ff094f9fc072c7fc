use crate::prelude::*;

/// Generate a random complete [`Dfa`] with `size` states over an alphabet with `symbols` distinct
/// symbols (see [`CharAlphabet::of_size`]). The algorithm is as follows:
/// 1. Create the states `q0` to `q{size - 1}`, `q0` is initial.
/// 2. For each state and symbol, draw a target state uniformly and add the corresponding edge.
/// 3. Each state is accepting with probability `accepting_probability`.
///
/// Note that there may be states that are not reachable from the initial state.
pub fn generate_random_dfa(symbols: usize, size: usize, accepting_probability: f64) -> Dfa {
    assert!(size > 0, "a DFA needs at least one state");
    let alphabet = CharAlphabet::of_size(symbols);
    let states = (0..size).map(|i| format!("q{i}")).collect::<Vec<_>>();

    let edges = states.iter().flat_map(|q| {
        alphabet
            .universe()
            .map(|sym| (q.clone(), sym, states[fastrand::usize(..size)].clone()))
            .collect::<Vec<_>>()
    });
    let accepting = states
        .iter()
        .filter(|_| fastrand::f64() < accepting_probability)
        .cloned()
        .collect::<Vec<_>>();

    DfaBuilder::new(format!("random-{symbols}-{size}"))
        .with_alphabet(alphabet.clone())
        .with_states(states.iter().cloned())
        .with_transitions(edges)
        .with_accepting(accepting)
        .into_dfa("q0")
}

/// Generate a random `String` over the universe of the `alphabet`
/// The length of the `String` is drawn uniformly from the range `min_len..=max_len`.
pub fn generate_random_word(alphabet: &CharAlphabet, min_len: usize, max_len: usize) -> String {
    let charset: Vec<char> = alphabet.universe().collect();
    if charset.is_empty() {
        return String::new();
    }

    let length = fastrand::usize(min_len..=max_len);
    (0..length)
        .map(|_| charset[fastrand::usize(..charset.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dfas_are_complete_and_valid() {
        for _ in 0..20 {
            let dfa = generate_random_dfa(3, 6, 0.5);
            let report = dfa.validate();
            assert!(report.is_valid(), "{:?}", report.errors);
            assert!(report.warnings.is_empty());
            assert_eq!(dfa.transitions.len(), 18);
        }
    }

    #[test_log::test]
    fn path_length_matches_input() {
        for _ in 0..20 {
            let dfa = generate_random_dfa(2, 5, 0.3);
            for _ in 0..20 {
                let word = generate_random_word(&dfa.alphabet, 0, 12);
                let result = dfa.process(&word);
                assert_eq!(result.path.len(), word.chars().count() + 1);
                assert!(result.remaining_input.is_empty());
                assert_eq!(result.accepted, dfa.is_accepting(&result.current_state));
                assert_eq!(dfa.simulation_steps(&word).len(), word.chars().count() + 1);
                assert_eq!(dfa.process(&word), result);
            }
        }
    }

    #[test]
    fn truncated_runs_match_step_count() {
        for _ in 0..20 {
            let mut dfa = generate_random_dfa(2, 4, 0.5);
            // drop every transition on 'b' leaving q1
            dfa.transitions.retain(|t| !(t.from == "q1" && t.symbol == 'b'));
            for _ in 0..20 {
                let word = generate_random_word(&dfa.alphabet, 0, 10);
                let result = dfa.process(&word);
                let steps = dfa.simulation_steps(&word);
                assert_eq!(steps.len(), result.path.len());
                let consumed = word.chars().count() - result.remaining_input.chars().count();
                assert_eq!(result.path.len(), consumed + 1);
                if result.failure().is_some() {
                    assert!(!result.accepted);
                    assert_eq!(result.current_state, "q1");
                }
            }
        }
    }

    #[test]
    fn words_respect_bounds() {
        let alphabet = CharAlphabet::from("xyz");
        for _ in 0..50 {
            let word = generate_random_word(&alphabet, 2, 4);
            assert!((2..=4).contains(&word.len()));
            assert!(word.chars().all(|c| alphabet.contains(c)));
        }
        assert_eq!(generate_random_word(&CharAlphabet::default(), 1, 3), "");
    }
}
