use std::collections::BTreeSet;

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

use crate::{automaton::StateIndex, math::Partition, DFA};

/// Computes the coarsest partition of the states of `dfa` into classes of states that accept
/// the same language, following Moore's algorithm.
///
/// We start with the classes of accepting and of rejecting states (empty ones are dropped).
/// In each round, every class is split according to the signature of its members, which lists
/// for each symbol (in the order of the alphabet) the class that the transition on it leads to,
/// or `None` if there is no transition. The classes produced from a single class appear in the
/// order of their smallest member. Once a round does not increase the number of classes, the
/// partition is stable and returned.
pub(crate) fn moore_partition(dfa: &DFA) -> Partition<StateIndex> {
    let symbols = dfa.alphabet().universe().collect_vec();
    let mut partition = Partition::new([
        dfa.accepting_states().collect_vec(),
        dfa.rejecting_states().collect_vec(),
    ]);
    let mut rounds = 0;

    loop {
        rounds += 1;
        let lookup = partition.class_lookup();
        let signature = |q: StateIndex| {
            symbols
                .iter()
                .map(|&symbol| dfa.transition(q, symbol).map(|p| lookup[&p]))
                .collect_vec()
        };

        let mut refined: Vec<BTreeSet<StateIndex>> = Vec::with_capacity(partition.size());
        for class in &partition {
            let mut split: IndexMap<Vec<Option<usize>>, BTreeSet<StateIndex>> = IndexMap::new();
            for &q in class {
                split.entry(signature(q)).or_default().insert(q);
            }
            refined.extend(split.into_values());
        }
        trace!(
            "round {rounds} refined {} classes into {}",
            partition.size(),
            refined.len()
        );

        let stable = refined.len() == partition.size();
        partition = Partition::from(refined);
        if stable {
            return partition;
        }
    }
}
