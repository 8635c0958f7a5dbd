pub(crate) mod partition_refinement;

use tracing::debug;

use crate::{automaton::StateIndex, math::Partition, DfaError, DFA};

impl DFA {
    /// Partitions the states into classes of states that accept the same language, see
    /// Moore's algorithm. Every state belongs to exactly one class and the class of accepting
    /// states (if any) is refined first, so classes of accepting states come first.
    pub fn equivalent_states(&self) -> Partition<StateIndex> {
        partition_refinement::moore_partition(self)
    }

    /// Computes the minimal automaton that accepts the same language as `self`. Its states are
    /// the classes of [`DFA::equivalent_states`] that are reachable from the class of the initial
    /// state, named after their members (e.g. `{1, 3}`).
    ///
    /// An automaton with fewer than two states is returned unchanged. Note that missing transitions
    /// are treated as a distinct target, so a partial automaton is minimized among the partial
    /// automata, call [`DFA::complete`] first to obtain the minimal complete one.
    ///
    /// # Example
    /// ```
    /// use dfakit::prelude::*;
    ///
    /// // states 1 and 2 both accept everything
    /// let dfa = DFA::builder()
    ///     .with_accepting([1, 2])
    ///     .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 2), (1, 'b', 1), (2, 'a', 1), (2, 'b', 2)])
    ///     .into_dfa(0)
    ///     .unwrap();
    /// let minimized = dfa.minimize().unwrap();
    /// assert_eq!(minimized.size(), 2);
    /// assert_eq!(minimized.state_name(1), Some("{1, 2}"));
    /// ```
    pub fn minimize(&self) -> Result<DFA, DfaError> {
        if self.size() < 2 {
            return Ok(self.clone());
        }
        let partition = self.equivalent_states();
        let minimized = self.quotient(&partition)?;
        debug!(
            "minimized automaton from {} to {} states, {} classes",
            self.size(),
            minimized.size(),
            partition.size()
        );
        Ok(minimized)
    }
}
