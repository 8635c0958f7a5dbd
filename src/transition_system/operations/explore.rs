use std::{collections::VecDeque, hash::Hash};

use tracing::trace;

use crate::{alphabet::CharAlphabet, automaton::StateIndex, math::Map, DfaError, DFA};

/// Lazily builds the automaton whose states are the keys of type `K` that can be reached
/// from `origin`. `step` gives the successor key of a key on a symbol (or `None` if there
/// is no transition), `name` and `accepting` determine the name and acceptance of the state
/// that is created for a key. Keys are discovered with a worklist, so only reachable keys are
/// materialized and states are numbered in breadth-first order.
///
/// The names produced by `name` must be distinct for distinct keys.
pub(crate) fn explore<K, N, A, S>(
    alphabet: CharAlphabet,
    origin: K,
    mut name: N,
    mut accepting: A,
    mut step: S,
) -> Result<DFA, DfaError>
where
    K: Copy + Eq + Hash,
    N: FnMut(K) -> String,
    A: FnMut(K) -> bool,
    S: FnMut(K, char) -> Option<K>,
{
    let symbols: Vec<char> = alphabet.universe().collect();
    let mut dfa = DFA::for_alphabet(alphabet);
    let mut ids: Map<K, StateIndex> = Map::default();
    let mut queue = VecDeque::new();

    let initial = dfa.add_state(name(origin), accepting(origin))?;
    dfa.set_initial(initial)?;
    ids.insert(origin, initial);
    queue.push_back((origin, initial));

    while let Some((key, source)) = queue.pop_front() {
        for &symbol in &symbols {
            let Some(next) = step(key, symbol) else {
                continue;
            };
            let target = match ids.get(&next) {
                Some(&target) => target,
                None => {
                    let target = dfa.add_state(name(next), accepting(next))?;
                    trace!("discovered state {}", dfa.name_of(target));
                    ids.insert(next, target);
                    queue.push_back((next, target));
                    target
                }
            };
            dfa.add_transition(source, symbol, target)?;
        }
    }

    Ok(dfa)
}
