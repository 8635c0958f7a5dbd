use std::fmt::{Debug, Display};

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

use crate::{
    alphabet::CharAlphabet, math::Bijection, transition_system::builder::DFABuilder, DfaError,
};

use super::{Indexes, StateIndex};

/// A deterministic finite automaton (DFA) over a [`CharAlphabet`]. It accepts a finite word
/// if the run on that word starting in the initial state ends in an accepting state.
///
/// States live in an arena and are identified by a [`StateIndex`], their position in the order
/// of insertion. In addition, every state carries a unique name, which is what the textual
/// representations ([`Display`], DOT, scripts) refer to. The transition function is partial:
/// for every state and symbol there is at most one outgoing transition, which is enforced by
/// [`DFA::add_transition`] rejecting a second one.
///
/// # Example
/// ```
/// use dfakit::prelude::*;
///
/// let mut dfa = DFA::new("ab");
/// let q0 = dfa.add_state("0", false).unwrap();
/// let q1 = dfa.add_state("1", true).unwrap();
/// dfa.set_initial(q0).unwrap();
/// dfa.add_transition(q0, 'a', q1).unwrap();
/// dfa.add_transition("0", 'b', "0").unwrap();
/// dfa.add_transition(q1, 'a', q1).unwrap();
/// dfa.add_transition(q1, 'b', q1).unwrap();
///
/// assert!(dfa.accepts("aab"));
/// assert!(!dfa.accepts("bb"));
/// ```
#[derive(Clone)]
pub struct DFA {
    alphabet: CharAlphabet,
    names: Bijection<StateIndex, String>,
    accepting: Vec<bool>,
    edges: Vec<IndexMap<char, StateIndex>>,
    initial: Option<StateIndex>,
}

impl DFA {
    /// Creates an automaton without any states over the given alphabet. Duplicate symbols are
    /// ignored, so `DFA::new("abca")` has the alphabet `abc`.
    pub fn new<A: Into<CharAlphabet>>(alphabet: A) -> Self {
        Self::for_alphabet(alphabet.into())
    }

    /// Creates an automaton without any states over the given [`CharAlphabet`].
    pub fn for_alphabet(alphabet: CharAlphabet) -> Self {
        Self {
            alphabet,
            names: Bijection::new(),
            accepting: vec![],
            edges: vec![],
            initial: None,
        }
    }

    /// Returns a [`DFABuilder`] which allows constructing an automaton from a list of edges.
    pub fn builder() -> DFABuilder {
        DFABuilder::default()
    }

    /// Gives a reference to the alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.accepting.len()
    }

    /// Iterates over the indices of all states in insertion order.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.size()
    }

    /// Returns the name of the state with index `state`.
    pub fn state_name(&self, state: StateIndex) -> Option<&str> {
        self.names.get_by_left(&state).map(String::as_str)
    }

    /// Like [`DFA::state_name`] for indices that are known to exist.
    pub(crate) fn name_of(&self, state: StateIndex) -> &str {
        self.state_name(state).unwrap_or_default()
    }

    /// Looks up the index of the state called `name`.
    pub fn find_state(&self, name: &str) -> Option<StateIndex> {
        self.names.get_by_right(name).copied()
    }

    /// Returns the initial state, if one has been set.
    pub fn initial(&self) -> Option<StateIndex> {
        self.initial
    }

    /// Returns true if `state` exists and is accepting.
    pub fn is_accepting<Idx: Indexes>(&self, state: Idx) -> bool {
        state
            .to_index(self)
            .map(|q| self.accepting[q])
            .unwrap_or(false)
    }

    /// Returns the indices of all states that are accepting.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|&q| self.accepting[q])
    }

    /// Returns the indices of all states that are rejecting.
    pub fn rejecting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|&q| !self.accepting[q])
    }

    /// Returns the target of the transition from `state` on `symbol`, if it exists.
    pub fn transition(&self, state: StateIndex, symbol: char) -> Option<StateIndex> {
        self.edges.get(state)?.get(&symbol).copied()
    }

    /// Iterates over the outgoing transitions of `state` as pairs of symbol and target, in
    /// the order in which they were added.
    pub fn edges_from(&self, state: StateIndex) -> impl Iterator<Item = (char, StateIndex)> + '_ {
        self.edges
            .get(state)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&symbol, &target)| (symbol, target)))
    }

    /// Iterates over all transitions as triples `(source, symbol, target)`, ordered by source.
    pub fn edges(&self) -> impl Iterator<Item = (StateIndex, char, StateIndex)> + '_ {
        self.state_indices().flat_map(move |source| {
            self.edges_from(source)
                .map(move |(symbol, target)| (source, symbol, target))
        })
    }

    /// The total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.edges.iter().map(IndexMap::len).sum()
    }

    /// Adds a new state with the given name, fails if a state with the same name exists.
    pub fn add_state<S: Into<String>>(
        &mut self,
        name: S,
        accepting: bool,
    ) -> Result<StateIndex, DfaError> {
        let name = name.into();
        if self.names.contains_right(&name) {
            return Err(DfaError::DuplicateState(name));
        }
        Ok(self.push_state(name, accepting))
    }

    /// Adds a state without checking whether the name is still free.
    pub(crate) fn push_state(&mut self, name: String, accepting: bool) -> StateIndex {
        let index = self.size();
        trace!("adding state {name} with index {index}");
        self.names.insert(index, name);
        self.accepting.push(accepting);
        self.edges.push(IndexMap::new());
        index
    }

    /// Adds the transition from `source` on `symbol` to `target`. This fails if the symbol
    /// is not part of the alphabet, if either of the states does not exist or if a transition
    /// from `source` on `symbol` is already present. An existing transition is never replaced.
    pub fn add_transition<S: Indexes, T: Indexes>(
        &mut self,
        source: S,
        symbol: char,
        target: T,
    ) -> Result<(), DfaError> {
        if !self.alphabet.contains(symbol) {
            return Err(DfaError::UnknownSymbol(symbol));
        }
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;

        if self.edges[source].contains_key(&symbol) {
            return Err(DfaError::DuplicateTransition {
                state: self.name_of(source).to_string(),
                symbol,
            });
        }
        self.edges[source].insert(symbol, target);
        Ok(())
    }

    /// Inserts a transition whose validity has already been established.
    pub(crate) fn push_transition(&mut self, source: StateIndex, symbol: char, target: StateIndex) {
        self.edges[source].insert(symbol, target);
    }

    /// Designates `state` as the initial state and returns its index.
    pub fn set_initial<Idx: Indexes>(&mut self, state: Idx) -> Result<StateIndex, DfaError> {
        let q = self.resolve(state)?;
        self.initial = Some(q);
        Ok(q)
    }

    /// Designates an existing state as initial.
    pub(crate) fn mark_initial(&mut self, state: StateIndex) {
        self.initial = Some(state);
    }

    /// Marks `state` as accepting or rejecting.
    pub fn set_accepting<Idx: Indexes>(
        &mut self,
        state: Idx,
        accepting: bool,
    ) -> Result<(), DfaError> {
        let q = self.resolve(state)?;
        self.accepting[q] = accepting;
        Ok(())
    }

    pub(crate) fn resolve<Idx: Indexes>(&self, state: Idx) -> Result<StateIndex, DfaError> {
        state
            .to_index(self)
            .ok_or_else(|| DfaError::UnknownState(state.to_string()))
    }

    /// Returns `base` if no state has that name, otherwise `base_1`, `base_2` and so on,
    /// whichever is free first.
    pub(crate) fn fresh_name(&self, base: &str) -> String {
        if !self.names.contains_right(base) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{base}_{i}"))
            .find(|name| !self.names.contains_right(name))
            .unwrap_or_default()
    }

    /// Flips the acceptance of every state.
    pub(crate) fn flip_acceptance(&mut self) {
        self.accepting.iter_mut().for_each(|a| *a = !*a);
    }

    /// Adds the given symbols to the alphabet.
    pub(crate) fn extend_alphabet<I: IntoIterator<Item = char>>(&mut self, symbols: I) {
        self.alphabet.extend(symbols);
    }

    /// Returns a string representation of the transition table.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(self.alphabet.universe().map(String::from)),
        );
        for q in self.state_indices() {
            let marker = match (self.initial == Some(q), self.accepting[q]) {
                (true, true) => "->*",
                (true, false) => "->",
                (false, true) => "*",
                (false, false) => "",
            };
            let mut row = vec![format!("{marker}{}", self.name_of(q))];
            for symbol in self.alphabet.universe() {
                row.push(
                    self.transition(q, symbol)
                        .map(|p| self.name_of(p).to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl PartialEq for DFA {
    fn eq(&self, other: &Self) -> bool {
        self.alphabet == other.alphabet
            && self.initial == other.initial
            && self.accepting == other.accepting
            && self.edges == other.edges
            && self.names.iter().eq(other.names.iter())
    }
}
impl Eq for DFA {}

impl Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DFA")?;
        writeln!(f, "   - alphabet   : '{}'", self.alphabet)?;
        writeln!(
            f,
            "   - init       : {}",
            self.initial.map(|q| self.name_of(q)).unwrap_or("None")
        )?;
        writeln!(
            f,
            "   - finals     : [{}]",
            self.accepting_states().map(|q| self.name_of(q)).join(", ")
        )?;
        writeln!(f, "   - states ({})", self.size())?;
        write!(f, "{}", self.build_transition_table())
    }
}

impl Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn construction_errors() {
        let mut dfa = DFA::new("ab");
        let q0 = dfa.add_state("0", false).unwrap();
        let q1 = dfa.add_state("1", true).unwrap();
        assert_eq!(
            dfa.add_state("1", false),
            Err(DfaError::DuplicateState("1".into()))
        );

        assert_eq!(
            dfa.add_transition(q0, 'c', q1),
            Err(DfaError::UnknownSymbol('c'))
        );
        assert_eq!(
            dfa.add_transition("0", 'a', "2"),
            Err(DfaError::UnknownState("2".into()))
        );
        assert_eq!(
            dfa.add_transition(7, 'a', q1),
            Err(DfaError::UnknownState("7".into()))
        );

        dfa.add_transition(q0, 'a', q1).unwrap();
        assert_eq!(
            dfa.add_transition(q0, 'a', q0),
            Err(DfaError::DuplicateTransition {
                state: "0".into(),
                symbol: 'a'
            })
        );
        // the rejected transition did not overwrite the existing one
        assert_eq!(dfa.transition(q0, 'a'), Some(q1));
        assert_eq!(dfa.transition_count(), 1);

        assert_eq!(dfa.set_initial("x"), Err(DfaError::UnknownState("x".into())));
        assert_eq!(dfa.initial(), None);
        assert_eq!(dfa.set_initial("0"), Ok(q0));
    }

    #[test]
    fn alphabet_is_deduplicated() {
        let dfa = DFA::new("abcab");
        assert_eq!(dfa.alphabet().to_string(), "abc");
    }

    #[test]
    fn accessors() {
        let dfa = DFA::builder()
            .with_accepting([1])
            .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'b', 0)])
            .into_dfa(0)
            .unwrap();

        assert_eq!(dfa.size(), 2);
        assert_eq!(dfa.find_state("1"), Some(1));
        assert_eq!(dfa.state_name(0), Some("0"));
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec![1]);
        assert_eq!(dfa.rejecting_states().collect::<Vec<_>>(), vec![0]);
        assert_eq!(
            dfa.edges().collect::<Vec<_>>(),
            vec![(0, 'a', 1), (0, 'b', 0), (1, 'b', 0)]
        );
        assert!(dfa.edges_from(5).next().is_none());
    }

    #[test]
    fn fresh_names() {
        let mut dfa = DFA::new("a");
        assert_eq!(dfa.fresh_name("sink"), "sink");
        dfa.add_state("sink", false).unwrap();
        dfa.add_state("sink_1", false).unwrap();
        assert_eq!(dfa.fresh_name("sink"), "sink_2");
    }

    #[test]
    fn display_lists_states_and_table() {
        let dfa = DFA::builder()
            .with_accepting([1])
            .with_edges([(0, 'a', 1)])
            .with_alphabet(['a', 'b'])
            .into_dfa(0)
            .unwrap();
        let shown = dfa.to_string();
        assert!(shown.contains("alphabet   : 'ab'"));
        assert!(shown.contains("finals     : [1]"));
        assert!(shown.contains("->0"));
        assert!(shown.contains("*1"));
    }
}
