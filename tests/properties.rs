#![cfg(all(feature = "random", feature = "minimize"))]

use dfakit::{
    prelude::*,
    random::{generate_random_dfa_seeded, generate_random_dfa_sized_seeded, generate_random_words_seeded},
};

fn words(alphabet: &CharAlphabet, seed: u64) -> Vec<String> {
    generate_random_words_seeded(alphabet, 0, 8, 50, seed).into_iter().collect()
}

#[test_log::test]
fn minimization_preserves_language() {
    for seed in 0..30 {
        let dfa = generate_random_dfa_sized_seeded(2, 8, seed);
        let minimized = dfa.minimize().unwrap();

        assert!(minimized.size() <= dfa.size());
        assert!(minimized.is_accessible());
        assert!(minimized.equivalent(&dfa).unwrap());
        for word in words(dfa.alphabet(), seed) {
            assert_eq!(minimized.accepts(&word), dfa.accepts(&word), "{word}");
        }

        let twice = minimized.minimize().unwrap();
        assert_eq!(twice.size(), minimized.size());
    }
}

#[test]
fn product_is_intersection() {
    for seed in 0..20 {
        let left = generate_random_dfa_seeded(2, 0.4, seed);
        let right = generate_random_dfa_sized_seeded(2, 5, seed + 100);
        let product = left.product(&right).unwrap();
        for word in words(left.alphabet(), seed) {
            assert_eq!(
                product.accepts(&word),
                left.accepts(&word) && right.accepts(&word),
                "{word}"
            );
        }
    }
}

#[test]
fn negation_and_reachability() {
    for seed in 0..20 {
        let dfa = generate_random_dfa_sized_seeded(3, 6, seed);
        let negated = dfa.negate().unwrap();
        assert_eq!(negated.negate().unwrap(), dfa);
        assert!(dfa.union(&negated).unwrap().negate().unwrap().is_empty_language());

        for q in dfa.state_indices() {
            for p in dfa.successors(q) {
                assert!(dfa.predecessors(p).contains(&q));
            }
            for p in dfa.predecessors(q) {
                assert!(dfa.successors(p).contains(&q));
            }
        }
        assert!(dfa.trim().unwrap().is_accessible());
    }
}

#[test]
fn scripts_round_trip() {
    for seed in 0..10 {
        let dfa = generate_random_dfa_seeded(3, 0.3, seed);
        assert_eq!(DFA::from_script(&dfa.to_script()).unwrap(), dfa);
    }
}
