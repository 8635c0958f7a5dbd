use crate::{
    automaton::{Indexes, StateIndex},
    math::Set,
    DFA,
};

impl DFA {
    /// Returns the set of states that have a transition into `state`. An unknown state has
    /// no predecessors.
    pub fn predecessors<Idx: Indexes>(&self, state: Idx) -> Set<StateIndex> {
        self.labelled_predecessors(state)
            .into_iter()
            .map(|(source, _)| source)
            .collect()
    }

    /// Returns all pairs `(source, symbol)` such that the transition from `source` on
    /// `symbol` leads to `state`, ordered by source.
    pub fn labelled_predecessors<Idx: Indexes>(&self, state: Idx) -> Vec<(StateIndex, char)> {
        let Some(target) = state.to_index(self) else {
            return vec![];
        };
        self.edges()
            .filter(|&(_, _, p)| p == target)
            .map(|(source, symbol, _)| (source, symbol))
            .collect()
    }

    /// Computes the reversed adjacency of the automaton in one pass: position `q` holds the
    /// deduplicated sources of all transitions into `q`.
    pub(crate) fn predecessor_lists(&self) -> Vec<Vec<StateIndex>> {
        let mut lists = vec![Vec::new(); self.size()];
        for (source, _, target) in self.edges() {
            if !lists[target].contains(&source) {
                lists[target].push(source);
            }
        }
        lists
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::Set, prelude::*};

    #[test]
    fn successors_and_predecessors_are_inverse() {
        let dfa = DFA::builder()
            .with_accepting([2])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 2),
                (1, 'a', 1),
                (1, 'b', 2),
                (2, 'a', 0),
            ])
            .into_dfa(0)
            .unwrap();

        assert_eq!(dfa.predecessors(2), Set::from_iter([0, 1]));
        assert_eq!(dfa.predecessors("0"), Set::from_iter([2]));
        assert_eq!(dfa.labelled_predecessors(1), vec![(0, 'a'), (1, 'a')]);

        for s in dfa.state_indices() {
            for t in dfa.state_indices() {
                for sym in dfa.alphabet().universe() {
                    let forward = dfa.transition(s, sym) == Some(t);
                    let backward = dfa.labelled_predecessors(t).contains(&(s, sym));
                    assert_eq!(forward, backward);
                }
                assert_eq!(
                    dfa.successors(s).contains(&t),
                    dfa.predecessors(t).contains(&s)
                );
            }
        }

        assert_eq!(dfa.predecessor_lists(), vec![vec![2], vec![0, 1], vec![0, 1]]);
        assert!(dfa.predecessors("missing").is_empty());
    }
}
