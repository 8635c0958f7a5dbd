use std::fmt::Display;

mod dfa;
pub use dfa::DFA;

/// Deterministic, injective naming of states that are composed of other states.
pub mod naming;

/// Running words through an automaton.
pub mod run;
pub use run::{FiniteRun, RunOutcome};

/// States are stored in an arena and referred to by their position in it.
pub type StateIndex = usize;

/// Implementors of this trait can be used to refer to a state of a [`DFA`], either
/// directly through its [`StateIndex`] or through its name.
///
/// # Example
/// ```
/// use dfakit::prelude::*;
///
/// let mut dfa = DFA::new("ab");
/// let q = dfa.add_state("q", false).unwrap();
/// assert_eq!("q".to_index(&dfa), Some(q));
/// assert_eq!(q.to_index(&dfa), Some(q));
/// assert_eq!("p".to_index(&dfa), None);
/// ```
pub trait Indexes: Display {
    /// Resolves `self` to the index of a state in `dfa`, returns `None` if no such
    /// state exists.
    fn to_index(&self, dfa: &DFA) -> Option<StateIndex>;
}

impl Indexes for StateIndex {
    fn to_index(&self, dfa: &DFA) -> Option<StateIndex> {
        (*self < dfa.size()).then_some(*self)
    }
}

impl Indexes for &str {
    fn to_index(&self, dfa: &DFA) -> Option<StateIndex> {
        dfa.find_state(self)
    }
}

impl Indexes for String {
    fn to_index(&self, dfa: &DFA) -> Option<StateIndex> {
        dfa.find_state(self)
    }
}

impl Indexes for &String {
    fn to_index(&self, dfa: &DFA) -> Option<StateIndex> {
        dfa.find_state(self)
    }
}
