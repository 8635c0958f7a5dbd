use std::fmt::Display;

use itertools::Itertools;

/// Represents an alphabet where a symbol is just a single `char`.
///
/// The symbols are kept in the order in which they were first given, duplicates are
/// dropped. This order is used whenever an algorithm iterates over the alphabet, so
/// it determines for example the order of transitions that a product construction
/// or a minimization produces.
///
/// # Example
/// ```
/// use dfakit::prelude::*;
///
/// let alphabet = CharAlphabet::from("abca");
/// assert_eq!(alphabet.size(), 3);
/// assert_eq!(alphabet.universe().collect::<String>(), "abc");
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord, Default)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] from an iterator over the symbols, only the first
    /// occurrence of each symbol is kept.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Self {
        Self(symbols.into_iter().unique().collect())
    }

    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    ///
    /// # Panics
    /// Panics if `size` is larger than 26.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// Returns an iterator over all symbols in their canonical order.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Checks whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    /// Returns the position of `symbol` in the canonical order.
    pub fn position(&self, symbol: char) -> Option<usize> {
        self.0.iter().position(|&s| s == symbol)
    }

    /// The number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Computes the union of `self` and `other`. The symbols of `self` come first,
    /// followed by the symbols of `other` that are not already present.
    pub fn union(&self, other: &CharAlphabet) -> CharAlphabet {
        self.universe().chain(other.universe()).collect()
    }

    /// Adds the given symbols, ignoring the ones that are already present.
    pub fn extend<I: IntoIterator<Item = char>>(&mut self, symbols: I) {
        for symbol in symbols {
            if !self.contains(symbol) {
                self.0.push(symbol);
            }
        }
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<&str> for CharAlphabet {
    fn from(value: &str) -> Self {
        value.chars().collect()
    }
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        Self::new(value)
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Display for CharAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(""))
    }
}

#[cfg(test)]
mod tests {
    use super::CharAlphabet;

    #[test]
    fn union_keeps_order_of_first_occurrence() {
        let left = CharAlphabet::from("ba");
        let right = CharAlphabet::from("cab");
        let union = left.union(&right);
        assert_eq!(union.to_string(), "bac");
        assert_eq!(union.position('c'), Some(2));
        assert!(!union.contains('d'));
    }

    #[test]
    fn of_size() {
        assert_eq!(CharAlphabet::of_size(3).to_string(), "abc");
        assert!(CharAlphabet::of_size(0).is_empty());
        assert_eq!(CharAlphabet::of_size(26)[25], 'z');
    }

    #[test]
    #[should_panic(expected = "Alphabet is too large")]
    fn of_size_beyond_latin_letters() {
        CharAlphabet::of_size(27);
    }
}
