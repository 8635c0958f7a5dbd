use fastrand::Rng;
use tracing::debug;

use crate::{alphabet::CharAlphabet, math, DFA};

/// Uses sprout-like algorithm to generate a random [`DFA`]. `symbols` determines the number of
/// distinct symbols in the [`CharAlphabet`]. `probability` determines the probability of a back
/// edge to some state being inserted. The algorithm is as follows:
/// 1. Start with a single state.
/// 2. For each symbol, go through the existing states in order and with probability `probability`
///    add a back edge to that state.
/// 3. If no back edge to some state was added, we insert an edge to a new state.
/// 4. Repeat until all states and symbols have been treated.
///
/// The result is complete and accessible, every state is accepting with probability one half.
///
/// # Panics
/// Panics if `symbols` is larger than 26, see [`CharAlphabet::of_size`].
pub fn generate_random_dfa(symbols: usize, probability: f64) -> DFA {
    random_dfa_with(&mut Rng::new(), symbols, probability)
}

/// Works as [`generate_random_dfa`], but draws from a generator initialized with `seed`, so the
/// result is reproducible.
pub fn generate_random_dfa_seeded(symbols: usize, probability: f64, seed: u64) -> DFA {
    random_dfa_with(&mut Rng::with_seed(seed), symbols, probability)
}

fn random_dfa_with(rng: &mut Rng, symbols: usize, probability: f64) -> DFA {
    let alphabet = CharAlphabet::of_size(symbols);
    let mut dfa = DFA::for_alphabet(alphabet.clone());
    dfa.push_state("0".to_string(), rng.bool());
    let mut current = 0;

    while current < dfa.size() {
        for symbol in alphabet.universe() {
            let back_edge = (0..=current).find(|_| rng.f64() < probability);
            let target = match back_edge {
                Some(target) => target,
                // no target was found so we create it
                None => dfa.push_state(dfa.size().to_string(), rng.bool()),
            };
            dfa.push_transition(current, symbol, target);
        }
        current += 1;
    }

    dfa.mark_initial(0);
    debug!("generated random automaton with {} states", dfa.size());
    dfa
}

/// Generate a random [`DFA`] with `size` states by randomly drawing transitions and acceptance.
/// `symbols` determines the number of distinct symbols in the [`CharAlphabet`]. The automaton
/// is complete and its initial state is `0`, depending on the drawn transitions there may be
/// unreachable states.
///
/// # Panics
/// Panics if `symbols` is larger than 26, see [`CharAlphabet::of_size`].
pub fn generate_random_dfa_sized(symbols: usize, size: usize) -> DFA {
    random_dfa_sized_with(&mut Rng::new(), symbols, size)
}

/// Works as [`generate_random_dfa_sized`] with a generator initialized with `seed`.
pub fn generate_random_dfa_sized_seeded(symbols: usize, size: usize, seed: u64) -> DFA {
    random_dfa_sized_with(&mut Rng::with_seed(seed), symbols, size)
}

fn random_dfa_sized_with(rng: &mut Rng, symbols: usize, size: usize) -> DFA {
    let alphabet = CharAlphabet::of_size(symbols);
    let mut dfa = DFA::for_alphabet(alphabet.clone());
    for q in 0..size {
        dfa.push_state(q.to_string(), rng.bool());
    }
    for q in dfa.state_indices() {
        for symbol in alphabet.universe() {
            dfa.push_transition(q, symbol, rng.usize(..size));
        }
    }
    if size > 0 {
        dfa.mark_initial(0);
    }
    dfa
}

/// Generate a random `String` over the universe of the `alphabet`
/// The length of the `String` is drawn uniformly from the range `min_len..=max_len`.
pub fn generate_random_word(alphabet: &CharAlphabet, min_len: usize, max_len: usize) -> String {
    random_word_with(&mut Rng::new(), alphabet, min_len, max_len)
}

fn random_word_with(rng: &mut Rng, alphabet: &CharAlphabet, min_len: usize, max_len: usize) -> String {
    if alphabet.is_empty() {
        return String::new();
    }
    let length = rng.usize(min_len..=max_len);
    (0..length)
        .map(|_| alphabet[rng.usize(..alphabet.size())])
        .collect()
}

/// Generate a set of `number` random `String`s over the universe of the `alphabet`.
/// The length for each sampled word is drawn uniformly from the range `min_len..=max_len`.
/// There have to be at least `number` distinct words of suitable length, otherwise this
/// does not terminate.
pub fn generate_random_words(
    alphabet: &CharAlphabet,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> math::Set<String> {
    random_words_with(&mut Rng::new(), alphabet, min_len, max_len, number)
}

/// Works as [`generate_random_words`], but draws from a generator initialized with `seed`.
pub fn generate_random_words_seeded(
    alphabet: &CharAlphabet,
    min_len: usize,
    max_len: usize,
    number: usize,
    seed: u64,
) -> math::Set<String> {
    random_words_with(&mut Rng::with_seed(seed), alphabet, min_len, max_len, number)
}

fn random_words_with(
    rng: &mut Rng,
    alphabet: &CharAlphabet,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> math::Set<String> {
    let mut word_set = math::Set::with_capacity_and_hasher(number, Default::default());

    while word_set.len() < number {
        word_set.insert(random_word_with(rng, alphabet, min_len, max_len));
    }

    word_set
}

#[cfg(test)]
mod tests {
    use super::{
        generate_random_dfa, generate_random_dfa_seeded, generate_random_dfa_sized,
        generate_random_dfa_sized_seeded, generate_random_words, generate_random_words_seeded,
    };
    use crate::prelude::*;

    #[test]
    fn random_dfa_is_complete_and_accessible() {
        for _ in 0..20 {
            let dfa = generate_random_dfa(3, 0.3);
            assert!(dfa.is_complete());
            assert!(dfa.is_accessible());
            assert_eq!(dfa.initial(), Some(0));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        assert_eq!(
            generate_random_dfa_seeded(2, 0.4, 42),
            generate_random_dfa_seeded(2, 0.4, 42)
        );
        assert_eq!(
            generate_random_dfa_sized_seeded(2, 6, 7),
            generate_random_dfa_sized_seeded(2, 6, 7)
        );
        let alphabet = CharAlphabet::of_size(3);
        assert_eq!(
            generate_random_words_seeded(&alphabet, 0, 6, 15, 3),
            generate_random_words_seeded(&alphabet, 0, 6, 15, 3)
        );
    }

    #[test]
    fn random_dfa_sized() {
        let dfa = generate_random_dfa_sized(2, 4);
        assert_eq!(dfa.size(), 4);
        assert_eq!(dfa.transition_count(), 8);
        assert_eq!(generate_random_dfa_sized(2, 0).initial(), None);
    }

    #[test]
    fn random_words() {
        let alphabet = CharAlphabet::of_size(2);
        let word_set = generate_random_words(&alphabet, 1, 10, 20);
        assert_eq!(word_set.len(), 20);
        assert!(word_set
            .iter()
            .all(|w| (1..=10).contains(&w.len()) && w.chars().all(|c| alphabet.contains(c))));
    }
}
