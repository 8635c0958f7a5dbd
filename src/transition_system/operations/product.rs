use tracing::debug;

use crate::{
    automaton::{naming, StateIndex},
    DfaError, DFA,
};

use super::explore;

/// Identifies a state of a product automaton by the pair of states in the left and right
/// operand that it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductIndex(pub StateIndex, pub StateIndex);

impl DFA {
    /// Computes the synchronized product of `self` and `other` over the union of both
    /// alphabets. A product state is accepting if both of its components are, so the
    /// result accepts the intersection of the two languages.
    ///
    /// Only pairs that are reachable from the pair of initial states are constructed. A
    /// pair has a transition on a symbol exactly if both components have one, so symbols
    /// that only one of the operands knows never advance the product.
    ///
    /// # Example
    /// ```
    /// use dfakit::prelude::*;
    ///
    /// let even_a = DFA::builder()
    ///     .with_accepting([0])
    ///     .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
    ///     .into_dfa(0)
    ///     .unwrap();
    /// let ends_with_b = DFA::builder()
    ///     .with_accepting([1])
    ///     .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 0), (1, 'b', 1)])
    ///     .into_dfa(0)
    ///     .unwrap();
    ///
    /// let product = even_a.product(&ends_with_b).unwrap();
    /// assert!(product.accepts("aab"));
    /// assert!(!product.accepts("ab"));
    /// assert!(!product.accepts("aa"));
    /// assert_eq!(product.state_name(0), Some("(0, 0)"));
    /// ```
    pub fn product(&self, other: &DFA) -> Result<DFA, DfaError> {
        self.product_with(other, |left, right| left && right)
    }

    /// Same as [`DFA::product`].
    pub fn intersection(&self, other: &DFA) -> Result<DFA, DfaError> {
        self.product(other)
    }

    /// Performs the product construction described in [`DFA::product`], but decides the
    /// acceptance of a product state by applying `combine` to the acceptance of its
    /// components.
    pub fn product_with<F>(&self, other: &DFA, combine: F) -> Result<DFA, DfaError>
    where
        F: Fn(bool, bool) -> bool,
    {
        let left = self.initial().ok_or(DfaError::MissingInitialState)?;
        let right = other.initial().ok_or(DfaError::MissingInitialState)?;

        let product = explore(
            self.alphabet().union(other.alphabet()),
            ProductIndex(left, right),
            |ProductIndex(l, r)| naming::pair_name(self.name_of(l), other.name_of(r)),
            |ProductIndex(l, r)| combine(self.is_accepting(l), other.is_accepting(r)),
            |ProductIndex(l, r), symbol| {
                Some(ProductIndex(
                    self.transition(l, symbol)?,
                    other.transition(r, symbol)?,
                ))
            },
        )?;
        debug!(
            "product of automata with {} and {} states has {} states",
            self.size(),
            other.size(),
            product.size()
        );
        Ok(product)
    }

    /// Computes an automaton for the union of the languages of `self` and `other`. Both
    /// operands are first extended to the union of their alphabets and completed, so that
    /// a word is not lost when only one of them can read it.
    pub fn union(&self, other: &DFA) -> Result<DFA, DfaError> {
        let (left, right) = self.aligned_with(other);
        left.product_with(&right, |l, r| l || r)
    }

    /// Decides whether `self` and `other` accept the same language, by checking that the
    /// product accepting the symmetric difference has an empty language. Both automata are
    /// completed over the union of their alphabets first.
    pub fn equivalent(&self, other: &DFA) -> Result<bool, DfaError> {
        let (left, right) = self.aligned_with(other);
        Ok(left
            .product_with(&right, |l, r| l != r)?
            .is_empty_language())
    }

    /// Completed copies of `self` and `other` over the union of their alphabets.
    fn aligned_with(&self, other: &DFA) -> (DFA, DFA) {
        let alphabet = self.alphabet().union(other.alphabet());
        (
            self.with_alphabet(alphabet.universe()).complete(),
            other.with_alphabet(alphabet.universe()).complete(),
        )
    }
}
