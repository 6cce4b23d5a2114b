//! Compound identifiers and sets of compounds
//!
//! A [`CompoundSet`] can represent e.g. the metabolites detected in an
//! experiment (the query), the reference population (the background) or
//! the members of one annotation category.
use std::collections::HashSet;
use std::fmt::Display;

/// An opaque compound identifier
///
/// The identifier can be any string token, e.g. a `CHEBI` or KEGG
/// compound ID or a plain compound name. Equality is exact and
/// case-sensitive, no normalization is performed. Surrounding
/// whitespace should be stripped before constructing the ID, as the
/// [`crate::parser`] module does for file input.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompoundId {
    inner: String,
}

impl CompoundId {
    /// Returns the identifier as string slice
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for CompoundId {
    fn from(value: &str) -> Self {
        CompoundId {
            inner: value.to_string(),
        }
    }
}

impl From<String> for CompoundId {
    fn from(inner: String) -> Self {
        CompoundId { inner }
    }
}

impl Display for CompoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// A set of unique [`CompoundId`]s
///
/// Duplicates collapse and the iteration order is unspecified.
/// The set provides the cardinality operations needed to derive a
/// contingency table: intersection and difference counts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompoundSet {
    inner: HashSet<CompoundId>,
}

impl CompoundSet {
    /// Returns a new, empty `CompoundSet`
    pub fn new() -> Self {
        CompoundSet::default()
    }

    /// Adds a compound to the set
    ///
    /// Returns `true` if the compound was not yet present
    pub fn insert<I: Into<CompoundId>>(&mut self, id: I) -> bool {
        self.inner.insert(id.into())
    }

    /// Returns the number of compounds in the set
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the compound is part of the set
    pub fn contains(&self, id: &CompoundId) -> bool {
        self.inner.contains(id)
    }

    /// The number of compounds in the set as `u64` count
    ///
    /// Identical to [`CompoundSet::len`], typed for use in the
    /// contingency table cells
    pub fn cardinality(&self) -> u64 {
        count_to_u64(self.inner.len())
    }

    /// The number of compounds present in both `self` and `other`
    pub fn intersection_count(&self, other: &CompoundSet) -> u64 {
        count_to_u64(self.inner.intersection(&other.inner).count())
    }

    /// The number of compounds present in `self` but not in `other`
    pub fn difference_count(&self, other: &CompoundSet) -> u64 {
        count_to_u64(self.inner.difference(&other.inner).count())
    }

    /// An iterator of all compounds in the set
    pub fn iter(&self) -> std::collections::hash_set::Iter<'_, CompoundId> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a CompoundSet {
    type Item = &'a CompoundId;
    type IntoIter = std::collections::hash_set::Iter<'a, CompoundId>;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<I: Into<CompoundId>> FromIterator<I> for CompoundSet {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        CompoundSet {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<I: Into<CompoundId>> Extend<I> for CompoundSet {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.inner.extend(iter.into_iter().map(Into::into));
    }
}

/// Set cardinalities are used as `u64` counts in the contingency table.
/// The conversion cannot fail on 64-bit targets, but we guard it anyway.
fn count_to_u64(n: usize) -> u64 {
    n.try_into().expect("set cardinality must fit into u64")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let set: CompoundSet = ["A", "B", "B", "A"].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn equality_is_case_sensitive() {
        let set: CompoundSet = ["glucose"].into_iter().collect();
        assert!(set.contains(&CompoundId::from("glucose")));
        assert!(!set.contains(&CompoundId::from("Glucose")));
    }

    #[test]
    fn intersection_counts() {
        let a: CompoundSet = ["A", "B", "C", "D", "E"].into_iter().collect();
        let b: CompoundSet = ["B", "C", "D", "E"].into_iter().collect();
        assert_eq!(a.intersection_count(&b), 4);
        assert_eq!(a.difference_count(&b), 1);
        assert_eq!(b.difference_count(&a), 0);
    }

    #[test]
    fn empty_set_counts() {
        let a: CompoundSet = ["A", "B"].into_iter().collect();
        let empty = CompoundSet::new();
        assert_eq!(empty.intersection_count(&a), 0);
        assert_eq!(empty.difference_count(&a), 0);
        assert_eq!(a.difference_count(&empty), 2);
        assert!(empty.is_empty());
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = CompoundSet::new();
        assert!(set.insert("A"));
        assert!(!set.insert("A"));
        assert_eq!(set.len(), 1);
    }
}
