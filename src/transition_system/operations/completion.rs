use itertools::Itertools;
use tracing::debug;

use crate::{automaton::StateIndex, DfaError, DFA};

impl DFA {
    /// Returns a complete copy of `self`. If `self` is already complete, the copy is identical,
    /// otherwise a fresh rejecting sink state is added, which receives all missing transitions
    /// and loops on every symbol. The sink is called `sink` unless that name is taken, see
    /// [`DFA::complete_in_place`].
    pub fn complete(&self) -> DFA {
        let mut completed = self.clone();
        completed.complete_in_place();
        completed
    }

    /// Completes `self` in place. Returns the index of the sink state if one had to be added.
    /// The sink is named `sink`, or `sink_1`, `sink_2`, ... if that name is already in use.
    pub fn complete_in_place(&mut self) -> Option<StateIndex> {
        if self.is_complete() {
            return None;
        }
        let symbols = self.alphabet().universe().collect_vec();
        let sink = self.push_state(self.fresh_name("sink"), false);
        let mut added = 0;
        for q in self.state_indices() {
            for &symbol in &symbols {
                if self.transition(q, symbol).is_none() {
                    self.push_transition(q, symbol, sink);
                    added += 1;
                }
            }
        }
        debug!(
            "completed automaton with sink {}, added {added} transitions",
            self.name_of(sink)
        );
        Some(sink)
    }

    /// Returns the complement of `self`, in which a state is accepting if and only if it is
    /// rejecting in `self`. Only for complete automata this recognizes the complement language,
    /// so incomplete ones are refused with [`DfaError::IncompleteAutomatonForNegation`].
    pub fn negate(&self) -> Result<DFA, DfaError> {
        let mut negated = self.clone();
        negated.negate_in_place()?;
        Ok(negated)
    }

    /// Negates `self` in place, see [`DFA::negate`]. On error `self` is left untouched.
    pub fn negate_in_place(&mut self) -> Result<(), DfaError> {
        if !self.is_complete() {
            return Err(DfaError::IncompleteAutomatonForNegation);
        }
        self.flip_acceptance();
        Ok(())
    }

    /// Returns a copy of `self` whose alphabet additionally contains the given symbols. No
    /// transitions are added, so the result is usually not complete.
    pub fn with_alphabet<I: IntoIterator<Item = char>>(&self, symbols: I) -> DFA {
        let mut extended = self.clone();
        extended.extend_alphabet(symbols);
        extended
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn partial() -> DFA {
        DFA::builder()
            .with_accepting([1])
            .with_edges([(0, 'a', 1), (1, 'b', 0)])
            .into_dfa(0)
            .unwrap()
    }

    #[test_log::test]
    fn completion_adds_sink() {
        let dfa = partial();
        assert!(!dfa.is_complete());

        let completed = dfa.complete();
        assert!(completed.is_complete());
        assert_eq!(completed.size(), 3);
        let sink = completed.find_state("sink").unwrap();
        assert!(!completed.is_accepting(sink));
        assert_eq!(completed.transition(0, 'b'), Some(sink));
        assert_eq!(completed.transition(sink, 'a'), Some(sink));
        assert_eq!(completed.transition(sink, 'b'), Some(sink));
        // existing transitions are untouched and the input is unchanged
        assert_eq!(completed.transition(0, 'a'), Some(1));
        assert_eq!(dfa.size(), 2);

        assert_eq!(completed.complete(), completed);
        assert_eq!(completed.clone().complete_in_place(), None);
    }

    #[test]
    fn sink_name_does_not_collide() {
        let dfa = DFA::builder()
            .with_edges([("sink", 'a', "sink"), ("sink", 'b', "q")])
            .into_dfa("sink")
            .unwrap();
        let completed = dfa.complete();
        assert_eq!(completed.state_name(2), Some("sink_1"));
        assert_eq!(completed.transition(1, 'a'), Some(2));
    }

    #[test]
    fn negation() {
        let dfa = partial();
        assert_eq!(
            dfa.negate(),
            Err(DfaError::IncompleteAutomatonForNegation)
        );
        let mut in_place = dfa.clone();
        assert!(in_place.negate_in_place().is_err());
        assert_eq!(in_place, dfa);

        let completed = dfa.complete();
        let negated = completed.negate().unwrap();
        assert_eq!(negated.accepting_states().collect::<Vec<_>>(), vec![0, 2]);
        for word in ["", "a", "ab", "abb", "aba", "b"] {
            assert_ne!(completed.accepts(word), negated.accepts(word));
        }
        assert_eq!(negated.negate().unwrap(), completed);
    }

    #[test]
    fn extended_alphabet_breaks_completeness() {
        let dfa = partial().complete();
        let extended = dfa.with_alphabet(['c']);
        assert_eq!(extended.alphabet().to_string(), "abc");
        assert!(!extended.is_complete());
        assert!(extended.complete().is_complete());
    }
}
