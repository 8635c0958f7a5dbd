use tracing::{error, trace, warn};

use crate::{word::FiniteWord, DfaError};

use super::{Indexes, StateIndex, DFA};

/// Describes how a run of a [`DFA`] on a finite word ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The whole word was consumed and the reached state is accepting.
    Accepted,
    /// The whole word was consumed and the reached state is rejecting.
    Rejected,
    /// The symbol at `position` is not part of the alphabet.
    UnknownSymbol {
        /// position of the offending symbol in the word
        position: usize,
        /// the offending symbol
        symbol: char,
    },
    /// The symbol at `position` belongs to the alphabet, but `state` has no transition on it.
    MissingTransition {
        /// position of the symbol in the word
        position: usize,
        /// the state in which the run got stuck
        state: StateIndex,
        /// the symbol without a transition
        symbol: char,
    },
}

/// A run of a [`DFA`] on a finite word. It stores the sequence of visited states, which has
/// one more element than the number of consumed symbols.
#[derive(Debug, Clone)]
pub struct FiniteRun<'a> {
    dfa: &'a DFA,
    word: Vec<char>,
    path: Vec<StateIndex>,
    outcome: RunOutcome,
}

impl<'a> FiniteRun<'a> {
    /// How the run ended.
    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Returns true if the word was consumed completely and ends in an accepting state.
    pub fn is_accepted(&self) -> bool {
        self.outcome == RunOutcome::Accepted
    }

    /// Returns true if the run could consume the whole word.
    pub fn is_successful(&self) -> bool {
        matches!(self.outcome, RunOutcome::Accepted | RunOutcome::Rejected)
    }

    /// The states visited by the run, starting with the origin.
    pub fn path(&self) -> &[StateIndex] {
        &self.path
    }

    /// The state reached after consuming the whole word, `None` if the run got stuck.
    pub fn reached(&self) -> Option<StateIndex> {
        if self.is_successful() {
            self.path.last().copied()
        } else {
            None
        }
    }

    /// The number of symbols that were consumed.
    pub fn consumed(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Iterates over the configurations of the run, which are pairs of the name of the
    /// current state and the suffix of the word that remains to be read.
    pub fn configurations(&self) -> impl Iterator<Item = (&'a str, String)> + '_ {
        let dfa = self.dfa;
        self.path
            .iter()
            .enumerate()
            .map(move |(i, &q)| (dfa.name_of(q), self.word[i..].iter().collect()))
    }
}

impl DFA {
    /// Runs `word` from the initial state. Fails only if no initial state is set, a run
    /// that gets stuck is reported through its [`RunOutcome`].
    pub fn run<W: FiniteWord>(&self, word: W) -> Result<FiniteRun<'_>, DfaError> {
        let initial = self.initial().ok_or(DfaError::MissingInitialState)?;
        self.run_from(initial, word)
    }

    /// Runs `word` from the state `origin`.
    pub fn run_from<Idx: Indexes, W: FiniteWord>(
        &self,
        origin: Idx,
        word: W,
    ) -> Result<FiniteRun<'_>, DfaError> {
        let mut current = self.resolve(origin)?;
        let word = word.symbols();
        let mut path = Vec::with_capacity(word.len() + 1);
        path.push(current);

        for (position, &symbol) in word.iter().enumerate() {
            trace!(
                "configuration: ({}, {})",
                self.name_of(current),
                word[position..].iter().collect::<String>()
            );
            if !self.alphabet().contains(symbol) {
                warn!("symbol '{symbol}' is not part of the alphabet, rejecting");
                return Ok(FiniteRun {
                    dfa: self,
                    word,
                    path,
                    outcome: RunOutcome::UnknownSymbol { position, symbol },
                });
            }
            match self.transition(current, symbol) {
                Some(next) => {
                    current = next;
                    path.push(current);
                }
                None => {
                    trace!(
                        "no transition available for ({}, {symbol})",
                        self.name_of(current)
                    );
                    return Ok(FiniteRun {
                        dfa: self,
                        word,
                        path,
                        outcome: RunOutcome::MissingTransition {
                            position,
                            state: current,
                            symbol,
                        },
                    });
                }
            }
        }

        let outcome = if self.is_accepting(current) {
            trace!("ending on final state {}", self.name_of(current));
            RunOutcome::Accepted
        } else {
            trace!("ending on non accepting state {}", self.name_of(current));
            RunOutcome::Rejected
        };
        Ok(FiniteRun {
            dfa: self,
            word,
            path,
            outcome,
        })
    }

    /// Returns true if and only if `word` is accepted. If no initial state is set, this is
    /// reported as an error and the word is rejected.
    pub fn accepts<W: FiniteWord>(&self, word: W) -> bool {
        match self.run(word) {
            Ok(run) => run.is_accepted(),
            Err(e) => {
                error!("cannot run word: {e}");
                false
            }
        }
    }

    /// Returns true if the run of `word` starting in `origin` ends in an accepting state.
    pub fn accepts_from<Idx: Indexes, W: FiniteWord>(&self, origin: Idx, word: W) -> bool {
        self.run_from(origin, word)
            .map(|run| run.is_accepted())
            .unwrap_or(false)
    }

    /// Returns the state that is reached from the initial state on `word`, if the run
    /// succeeds.
    pub fn reached_state<W: FiniteWord>(&self, word: W) -> Option<StateIndex> {
        self.run(word).ok()?.reached()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn two_states() -> DFA {
        DFA::builder()
            .with_accepting([1])
            .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 1)])
            .into_dfa(0)
            .unwrap()
    }

    #[test_log::test]
    fn accepts_words() {
        let dfa = two_states();
        assert!(dfa.accepts("aab"));
        assert!(!dfa.accepts("bb"));
        assert!(!dfa.accepts(""));
        assert!(dfa.accepts(vec!['b', 'a']));
        assert_eq!(dfa.reached_state("bba"), Some(1));
        assert!(dfa.accepts_from(1, ""));
    }

    #[test_log::test]
    fn foreign_symbol_and_missing_transition_are_distinguished() {
        let dfa = DFA::builder()
            .with_alphabet(['a', 'b', 'c'])
            .with_accepting([1])
            .with_edges([(0, 'a', 1)])
            .into_dfa(0)
            .unwrap();

        let run = dfa.run("ax").unwrap();
        assert_eq!(
            run.outcome(),
            RunOutcome::UnknownSymbol {
                position: 1,
                symbol: 'x'
            }
        );
        assert!(!run.is_accepted());
        assert_eq!(run.reached(), None);

        let run = dfa.run("ac").unwrap();
        assert_eq!(
            run.outcome(),
            RunOutcome::MissingTransition {
                position: 1,
                state: 1,
                symbol: 'c'
            }
        );
        assert_eq!(run.path(), &[0, 1]);
        assert!(!dfa.accepts("ac"));
    }

    #[test_log::test]
    fn configurations_follow_the_word() {
        let dfa = two_states();
        let run = dfa.run("ba").unwrap();
        assert_eq!(run.path(), &[0, 0, 1]);
        assert_eq!(run.consumed(), 2);
        assert_eq!(
            run.configurations().collect::<Vec<_>>(),
            vec![
                ("0", "ba".to_string()),
                ("0", "a".to_string()),
                ("1", "".to_string())
            ]
        );
    }

    #[test]
    fn missing_initial_state() {
        let mut dfa = DFA::new("a");
        dfa.add_state("q", true).unwrap();
        assert_eq!(dfa.run("a").unwrap_err(), DfaError::MissingInitialState);
        assert!(!dfa.accepts(""));
    }
}
