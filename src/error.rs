use thiserror::Error;

/// Errors that are reported when an operation would violate one of the invariants of a
/// [`crate::DFA`]. None of them leave the automaton in a modified state.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DfaError {
    /// A state with the given name already exists.
    #[error("state `{0}` already exists")]
    DuplicateState(String),
    /// The symbol is not part of the alphabet.
    #[error("symbol `{0}` is not part of the alphabet")]
    UnknownSymbol(char),
    /// No state is known under the given name or index.
    #[error("state `{0}` does not exist")]
    UnknownState(String),
    /// The state already has an outgoing transition on the symbol.
    #[error("a transition from `{state}` on `{symbol}` already exists")]
    DuplicateTransition {
        /// name of the source state
        state: String,
        /// symbol of the existing transition
        symbol: char,
    },
    /// The operation needs an initial state, but none is set.
    #[error("the automaton does not have an initial state")]
    MissingInitialState,
    /// Negation was requested for an automaton that is not complete.
    #[error("negation requires a complete automaton")]
    IncompleteAutomatonForNegation,
}
