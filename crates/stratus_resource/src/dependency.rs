//! Union-only sets of resource URNs.

use crate::urn::Urn;
use indexmap::IndexSet;

/// The set of resources a value depends on.
///
/// Iteration follows first-insertion order, which for decoded values is the
/// input traversal order. The set only grows: there is no removal API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    urns: IndexSet<Urn>,
}

impl DependencySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            urns: IndexSet::new(),
        }
    }

    /// Creates a set holding a single URN.
    #[must_use]
    pub fn single(urn: Urn) -> Self {
        let mut set = Self::new();
        set.insert(urn);
        set
    }

    /// Adds a URN, returning `true` if it was not already present.
    pub fn insert(&mut self, urn: Urn) -> bool {
        self.urns.insert(urn)
    }

    /// Adds every URN from `other`.
    pub fn union_with(&mut self, other: &DependencySet) {
        self.urns.extend(other.urns.iter().cloned());
    }

    /// Returns the union of `self` and `other`.
    #[must_use]
    pub fn union(mut self, other: &DependencySet) -> Self {
        self.union_with(other);
        self
    }

    /// Returns `true` if `urn` is in the set.
    #[must_use]
    pub fn contains(&self, urn: &Urn) -> bool {
        self.urns.contains(urn)
    }

    /// Returns `true` if the set holds exactly `urn` and nothing else.
    #[must_use]
    pub fn is_exactly(&self, urn: &Urn) -> bool {
        self.urns.len() == 1 && self.urns.contains(urn)
    }

    /// Returns the number of URNs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urns.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urns.is_empty()
    }

    /// Iterates the URNs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Urn> {
        self.urns.iter()
    }
}

impl<U: Into<Urn>> FromIterator<U> for DependencySet {
    fn from_iter<I: IntoIterator<Item = U>>(iter: I) -> Self {
        Self {
            urns: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<U: Into<Urn>> Extend<U> for DependencySet {
    fn extend<I: IntoIterator<Item = U>>(&mut self, iter: I) {
        self.urns.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Urn;
    type IntoIter = indexmap::set::Iter<'a, Urn>;

    fn into_iter(self) -> Self::IntoIter {
        self.urns.iter()
    }
}
