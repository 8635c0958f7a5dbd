use std::path::PathBuf;

use dfakit::prelude::*;

fn demo(name: &str) -> DFA {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "demos", name].iter().collect();
    DFA::load(path).unwrap()
}

#[test_log::test]
fn first_automaton() {
    let mut dfa = DFA::new("ab");
    dfa.add_state("0", false).unwrap();
    dfa.add_state("1", true).unwrap();
    dfa.set_initial("0").unwrap();
    dfa.add_transition("0", 'a', "1").unwrap();
    dfa.add_transition("0", 'b', "0").unwrap();
    dfa.add_transition("1", 'a', "1").unwrap();
    dfa.add_transition("1", 'b', "1").unwrap();

    assert!(dfa.accepts("aab"));
    assert!(!dfa.accepts("bb"));
    assert!(dfa.is_complete());
    assert!(dfa.is_trim());
}

#[test_log::test]
fn runs_with_configurations() {
    let dfa = demo("contains_aaba.dfa");
    assert!(dfa.accepts("aabaabaa"));
    assert!(!dfa.accepts("bbababaabba"));

    let run = dfa.run("aaba").unwrap();
    assert_eq!(
        run.configurations()
            .map(|(state, rest)| format!("({state}, {rest})"))
            .collect::<Vec<_>>(),
        vec!["(0, aaba)", "(1, aba)", "(2, ba)", "(3, a)", "(4, )"]
    );
}

#[test]
fn foreign_and_missing_symbols() {
    let dfa = demo("contains_aab.dfa");
    let accepted = ["aabaa", "babaab", "abababaabaa", "bababbaabaaabaabababaabab", "babaaabbab"];
    for word in accepted {
        assert!(dfa.accepts(word), "{word}");
    }
    assert!(!dfa.accepts("bababb"));

    // c belongs to the alphabet, but no state reads it
    assert_eq!(
        dfa.run("aabac").unwrap().outcome(),
        RunOutcome::MissingTransition {
            position: 4,
            state: 3,
            symbol: 'c'
        }
    );
    assert_eq!(
        dfa.run("aax").unwrap().outcome(),
        RunOutcome::UnknownSymbol {
            position: 2,
            symbol: 'x'
        }
    );
    assert!(!dfa.accepts("aax"));
}

#[test]
fn completion_and_negation() {
    let dfa = demo("contains_aab.dfa");
    assert!(!dfa.is_complete());
    assert_eq!(dfa.negate(), Err(DfaError::IncompleteAutomatonForNegation));

    let completed = dfa.complete();
    assert!(completed.is_complete());
    assert_eq!(completed.size(), 5);
    assert!(!completed.is_coaccessible());

    let negated = completed.negate().unwrap();
    for word in ["", "aab", "aabac", "cab", "bbbb"] {
        assert_ne!(completed.accepts(word), negated.accepts(word), "{word}");
    }
}

#[test]
fn product_of_demo_automata() {
    let aab = demo("contains_aab.dfa");
    let even = demo("redundant.dfa");
    let product = aab.product(&even).unwrap();

    assert_eq!(product.alphabet().to_string(), "abc");
    assert_eq!(product.state_name(0), Some("(0, e0)"));
    for word in ["aab", "aaab", "aabaa", "baab", "aabc"] {
        assert_eq!(
            product.accepts(word),
            aab.accepts(word) && even.accepts(word),
            "{word}"
        );
    }
}

#[test_log::test]
fn minimization() {
    let dfa = demo("redundant.dfa");
    let minimized = dfa.minimize().unwrap();
    assert_eq!(minimized.size(), 2);
    assert_eq!(minimized.state_name(0), Some("{e0, e1}"));
    assert_eq!(minimized.state_name(1), Some("{o0, o1}"));
    assert!(minimized.equivalent(&dfa).unwrap());

    // the automaton for aaba is already minimal
    let aaba = demo("contains_aaba.dfa");
    assert_eq!(aaba.minimize().unwrap().size(), aaba.size());
}

#[test]
fn script_and_dot_of_minimized() {
    let minimized = demo("redundant.dfa").minimize().unwrap();
    let reloaded = DFA::from_script(&minimized.to_script()).unwrap();
    assert_eq!(reloaded, minimized);

    let dot = minimized.dot_with_options(&DotOptions::default().grouped(true));
    assert!(dot.contains("Q_0 [shape=\"doublecircle\", label=\"{e0, e1}\"];"));
    assert!(dot.contains("Q_0 -> Q_1 [label=\"a\"];"));
    assert!(dot.contains("Q_0 -> Q_0 [label=\"b\"];"));
}
