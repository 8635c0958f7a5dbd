/// A finite word is anything that can be turned into a sequence of `char` symbols. This
/// allows passing string slices, `String`s as well as vectors and slices of symbols to
/// the functions that run an automaton.
pub trait FiniteWord {
    /// Returns the symbols of the word in order.
    fn symbols(&self) -> Vec<char>;

    /// The number of symbols in the word.
    fn len(&self) -> usize {
        self.symbols().len()
    }

    /// Returns true if the word has no symbols.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FiniteWord for str {
    fn symbols(&self) -> Vec<char> {
        self.chars().collect()
    }
}

impl FiniteWord for String {
    fn symbols(&self) -> Vec<char> {
        self.chars().collect()
    }
}

impl FiniteWord for [char] {
    fn symbols(&self) -> Vec<char> {
        self.to_vec()
    }
}

impl FiniteWord for Vec<char> {
    fn symbols(&self) -> Vec<char> {
        self.clone()
    }
}

impl<const N: usize> FiniteWord for [char; N] {
    fn symbols(&self) -> Vec<char> {
        self.to_vec()
    }
}

impl<W: FiniteWord + ?Sized> FiniteWord for &W {
    fn symbols(&self) -> Vec<char> {
        W::symbols(*self)
    }
}
