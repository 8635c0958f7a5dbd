use crate::{
    automaton::{naming, StateIndex},
    math::Partition,
    DfaError, DFA,
};

use super::explore;

impl DFA {
    /// A quotient merges the states which are in the same class of some [`Partition`]. We
    /// assume that the partition is a congruence that respects acceptance, meaning for two
    /// states `p`, `q` of the same class and every symbol `a`, the `a`-successors of `p` and
    /// `q` are in the same class (or both undefined) and `p` is accepting iff `q` is. Then the
    /// transitions and the acceptance of a class can be taken from any of its members, we use
    /// the one with the smallest index.
    ///
    /// Only the classes that are reachable from the class of the initial state are
    /// materialized. A class is named after its members, e.g. `{0, 2}`. States which are not
    /// covered by the partition are treated as if their transitions were undefined.
    pub fn quotient(&self, partition: &Partition<StateIndex>) -> Result<DFA, DfaError> {
        let initial = self.initial().ok_or(DfaError::MissingInitialState)?;
        let lookup = partition.class_lookup();
        let origin = *lookup
            .get(&initial)
            .ok_or_else(|| DfaError::UnknownState(self.name_of(initial).to_string()))?;
        let representative = |class: usize| partition[class].first().copied();

        explore(
            self.alphabet().clone(),
            origin,
            |class| naming::class_name(partition[class].iter().map(|&q| self.name_of(q))),
            |class| representative(class).is_some_and(|q| self.is_accepting(q)),
            |class, symbol| {
                let target = self.transition(representative(class)?, symbol)?;
                lookup.get(&target).copied()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::Partition, prelude::*};

    #[test]
    fn quotient_merges_classes() {
        // 1 and 2 behave identically
        let dfa = DFA::builder()
            .with_accepting([1, 2])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 2),
                (1, 'a', 1),
                (1, 'b', 2),
                (2, 'a', 2),
                (2, 'b', 1),
            ])
            .into_dfa(0)
            .unwrap();
        let partition = Partition::new([vec![0], vec![1, 2]]);

        let quotient = dfa.quotient(&partition).unwrap();
        assert_eq!(quotient.size(), 2);
        assert_eq!(quotient.state_name(0), Some("{0}"));
        assert_eq!(quotient.state_name(1), Some("{1, 2}"));
        assert_eq!(quotient.transition(0, 'b'), Some(1));
        assert_eq!(quotient.transition(1, 'a'), Some(1));
        assert!(quotient.is_accepting("{1, 2}"));
    }

    #[test]
    fn uncovered_initial_state() {
        let dfa = DFA::builder()
            .with_edges([(0, 'a', 1)])
            .into_dfa(0)
            .unwrap();
        assert_eq!(
            dfa.quotient(&Partition::new([vec![1]])),
            Err(DfaError::UnknownState("0".into()))
        );
    }
}
