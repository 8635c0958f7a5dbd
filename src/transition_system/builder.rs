use tracing::debug;

use crate::{alphabet::CharAlphabet, DfaError, DFA};

/// Helper struct for the construction of a [`DFA`] from lists of states and edges. States are
/// referred to by name, anything implementing [`ToString`] can be used, which makes small
/// integers a convenient choice.
///
/// States are created in the following order: the ones given through [`DFABuilder::with_states`],
/// then the ones that appear on edges (in order of first appearance), then the ones that are only
/// marked as accepting and finally the initial state. Unless given explicitly, the alphabet consists
/// of the symbols that appear on edges.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']` where 1 is
/// accepting and 0 is initial, that accepts all words containing an `a`:
/// ```
/// use dfakit::prelude::*;
///
/// let dfa = DFA::builder()
///     .with_accepting([1])
///     .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 1)])
///     .into_dfa(0) // 0 is the initial state
///     .unwrap();
/// assert!(dfa.accepts("aab"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DFABuilder {
    symbols: Vec<char>,
    states: Vec<(String, bool)>,
    accepting: Vec<String>,
    edges: Vec<(String, char, String)>,
}

impl DFABuilder {
    /// Forces the given symbols to be part of the alphabet, even if they appear on no edge.
    /// These symbols come first in the order of the alphabet.
    pub fn with_alphabet<I: IntoIterator<Item = char>>(mut self, symbols: I) -> Self {
        self.symbols.extend(symbols);
        self
    }

    /// Declares states together with their acceptance.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: ToString,
    {
        self.states
            .extend(states.into_iter().map(|(name, acc)| (name.to_string(), acc)));
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.accepting
            .extend(states.into_iter().map(|name| name.to_string()));
        self
    }

    /// Adds edges given as triples `(source, symbol, target)`.
    pub fn with_edges<I, S, T>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (S, char, T)>,
        S: ToString,
        T: ToString,
    {
        self.edges.extend(
            edges
                .into_iter()
                .map(|(p, sym, q)| (p.to_string(), sym, q.to_string())),
        );
        self
    }

    /// Builds the automaton with the given initial state. Fails if two edges leave the same
    /// state on the same symbol or a state is declared twice.
    pub fn into_dfa<S: ToString>(self, initial: S) -> Result<DFA, DfaError> {
        let initial = initial.to_string();
        let mut dfa = self.build(Some(initial.as_str()))?;
        dfa.set_initial(initial.as_str())?;
        Ok(dfa)
    }

    /// Builds the automaton without designating an initial state.
    pub fn into_dfa_without_initial(self) -> Result<DFA, DfaError> {
        self.build(None)
    }

    fn build(self, initial: Option<&str>) -> Result<DFA, DfaError> {
        let alphabet = CharAlphabet::new(
            self.symbols
                .iter()
                .copied()
                .chain(self.edges.iter().map(|(_, sym, _)| *sym)),
        );
        let mut dfa = DFA::for_alphabet(alphabet);

        for (name, accepting) in &self.states {
            dfa.add_state(name.as_str(), *accepting)?;
        }
        let implicit = self
            .edges
            .iter()
            .flat_map(|(p, _, q)| [p.as_str(), q.as_str()])
            .chain(self.accepting.iter().map(String::as_str))
            .chain(initial);
        for name in implicit {
            if dfa.find_state(name).is_none() {
                dfa.add_state(name, false)?;
            }
        }
        for name in &self.accepting {
            dfa.set_accepting(name, true)?;
        }
        for (p, sym, q) in &self.edges {
            dfa.add_transition(p, *sym, q)?;
        }

        debug!(
            "built automaton with {} states and {} transitions",
            dfa.size(),
            dfa.transition_count()
        );
        Ok(dfa)
    }
}
