use std::{collections::BTreeSet, hash::Hash};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition groups elements of type `I` into pairwise disjoint, non-empty classes.
/// The classes are ordered, so a class can be referred to by its position.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Two partitions are equal if they consist of the same classes, the order of
/// the classes is irrelevant.
impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield
    /// elements of type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Returns the position of the class that contains `element`, if any.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(element))
    }

    /// Computes a map that assigns each element the position of its class.
    pub fn class_lookup(&self) -> Map<I, usize>
    where
        I: Copy,
    {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(position, class)| class.iter().map(move |&element| (element, position)))
            .collect()
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value.into_iter().filter(|class| !class.is_empty()).collect())
    }
}
