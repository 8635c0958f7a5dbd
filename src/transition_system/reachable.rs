use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{
    automaton::{Indexes, StateIndex},
    math::Set,
    DfaError, DFA,
};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<char>, StateIndex);

/// Iterator over the minimal representatives of the states that are reachable from a given origin.
/// A minimal representative of a state `q` is the length-lexicographically minimal word (with respect
/// to the order of the alphabet) on which `q` is reached. States are produced in breadth-first order.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a DFA,
    seen: BitSet,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a> MinimalRepresentatives<'a> {
    /// Starts the search in `origin`.
    pub fn new(dfa: &'a DFA, origin: StateIndex) -> Self {
        let mut seen = BitSet::with_capacity(dfa.size());
        seen.insert(origin);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }
}

impl<'a> Iterator for MinimalRepresentatives<'a> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for sym in self.dfa.alphabet().universe() {
            if let Some(p) = self.dfa.transition(q, sym) {
                if self.seen.insert(p) {
                    let mut new_access = access.clone();
                    new_access.push(sym);
                    self.queue.push_back((new_access, p));
                }
            }
        }
        Some((access, q))
    }
}

impl DFA {
    /// Returns the set of states that can be reached from `state` with exactly one transition.
    pub fn successors<Idx: Indexes>(&self, state: Idx) -> Set<StateIndex> {
        match state.to_index(self) {
            Some(q) => self.edges_from(q).map(|(_, p)| p).collect(),
            None => Set::default(),
        }
    }

    /// Worklist exploration starting from `seeds`, where `expand` yields the neighbours
    /// of a state. Every state is expanded at most once.
    fn explore_from<I, F, J>(&self, seeds: I, mut expand: F) -> Set<StateIndex>
    where
        I: IntoIterator<Item = StateIndex>,
        F: FnMut(StateIndex) -> J,
        J: IntoIterator<Item = StateIndex>,
    {
        let mut seen = BitSet::with_capacity(self.size());
        let mut worklist: Vec<StateIndex> = seeds
            .into_iter()
            .filter(|&q| seen.insert(q))
            .collect();

        while let Some(q) = worklist.pop() {
            trace!("exploring state {}", self.name_of(q));
            for p in expand(q) {
                if seen.insert(p) {
                    worklist.push(p);
                }
            }
        }
        seen.iter().collect()
    }

    /// Computes the set of states that are reachable from the initial state. If no initial state
    /// is set, no state is accessible.
    pub fn accessible_states(&self) -> Set<StateIndex> {
        let Some(initial) = self.initial() else {
            return Set::default();
        };
        self.explore_from([initial], |q| self.edges_from(q).map(|(_, p)| p))
    }

    /// Computes the set of states from which an accepting state can be reached.
    pub fn coaccessible_states(&self) -> Set<StateIndex> {
        let predecessors = self.predecessor_lists();
        self.explore_from(self.accepting_states(), |q| predecessors[q].iter().copied())
    }

    /// Returns true if every state is reachable from the initial state.
    pub fn is_accessible(&self) -> bool {
        self.accessible_states().len() == self.size()
    }

    /// Returns true if an accepting state can be reached from every state.
    pub fn is_coaccessible(&self) -> bool {
        self.coaccessible_states().len() == self.size()
    }

    /// Returns true if the automaton is accessible and coaccessible.
    pub fn is_trim(&self) -> bool {
        self.is_accessible() && self.is_coaccessible()
    }

    /// Returns true if every state has an outgoing transition on every symbol.
    pub fn is_complete(&self) -> bool {
        self.state_indices().all(|q| {
            self.alphabet()
                .universe()
                .all(|sym| self.transition(q, sym).is_some())
        })
    }

    /// Iterates over the minimal representatives of all accessible states, see
    /// [`MinimalRepresentatives`]. Yields nothing if no initial state is set.
    pub fn minimal_representatives(&self) -> impl Iterator<Item = MinimalRepresentative> + '_ {
        self.initial()
            .into_iter()
            .flat_map(|q| MinimalRepresentatives::new(self, q))
    }

    /// Tries to construct a (finite) word witnessing that the accepted language is non-empty. If such a
    /// word exists, the length-lexicographically minimal one is returned, otherwise `None`.
    pub fn give_word(&self) -> Option<Vec<char>> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.is_accepting(q).then_some(word))
    }

    /// Returns true if and only if the accepted language is empty.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Removes all states that are not accessible or not coaccessible, the initial state is
    /// always kept. Names, acceptance and the order of the remaining states are preserved.
    pub fn trim(&self) -> Result<DFA, DfaError> {
        let initial = self.initial().ok_or(DfaError::MissingInitialState)?;
        let coaccessible = self.coaccessible_states();
        let mut keep: Vec<StateIndex> = self
            .accessible_states()
            .into_iter()
            .filter(|q| coaccessible.contains(q) || *q == initial)
            .collect();
        keep.sort_unstable();

        let mut trimmed = DFA::for_alphabet(self.alphabet().clone());
        let mut renamed = vec![None; self.size()];
        for &q in &keep {
            renamed[q] = Some(trimmed.push_state(self.name_of(q).to_string(), self.is_accepting(q)));
        }
        for (source, symbol, target) in self.edges() {
            if let (Some(s), Some(t)) = (renamed[source], renamed[target]) {
                trimmed.push_transition(s, symbol, t);
            }
        }
        trimmed.set_initial(self.name_of(initial))?;
        debug!(
            "trimmed automaton from {} to {} states",
            self.size(),
            trimmed.size()
        );
        Ok(trimmed)
    }
}
