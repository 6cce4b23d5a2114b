//! Annotation categories and the catalog of categories tested in one run
//!
//! A [`Category`] pairs a name (e.g. a pathway or chemical-role label)
//! with the set of compounds annotated to it. The [`AnnotationCatalog`]
//! holds all categories of one analysis run in a stable, insertion-based
//! iteration order. That order defines the order of the result rows and
//! of the p-value sequence handed to the multiple-testing correction, so
//! adjusted values can be re-associated with their category by position.
use std::collections::HashMap;

use tracing::debug;

use crate::CompoundSet;
use crate::MseaError;
use crate::MseaResult;

/// A named annotation category with its member compounds
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    compounds: CompoundSet,
}

impl Category {
    /// Constructs a new `Category`
    pub fn new(name: &str, compounds: CompoundSet) -> Self {
        Category {
            name: name.to_string(),
            compounds,
        }
    }

    /// The name of the category
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compounds annotated to the category
    pub fn compounds(&self) -> &CompoundSet {
        &self.compounds
    }

    /// The number of compounds annotated to the category
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    /// Returns `true` if no compound is annotated to the category
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

/// Conflict policy when merging categories from several source databases
///
/// Annotation catalogs are often consolidated from more than one source
/// (e.g. a chemical ontology and a pathway database) and the same
/// category name can appear in both. The policy makes the resolution
/// explicit instead of silently unioning member sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// A duplicate category name is an error
    Reject,
    /// The later category replaces the earlier one, keeping its position
    /// in the iteration order
    LastWins,
}

/// An ordered mapping of category name to [`Category`]
///
/// Categories keep their insertion order when iterating, and each name
/// is unique within the catalog.
#[derive(Debug, Default, Clone)]
pub struct AnnotationCatalog {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl AnnotationCatalog {
    /// Returns a new, empty `AnnotationCatalog`
    pub fn new() -> Self {
        AnnotationCatalog::default()
    }

    /// Adds a category to the end of the catalog
    ///
    /// # Errors
    ///
    /// If a category with the same name is already present, returns
    /// [`MseaError::DuplicateCategory`]
    pub fn insert(&mut self, category: Category) -> MseaResult<()> {
        if self.index.contains_key(category.name()) {
            return Err(MseaError::DuplicateCategory(category.name().to_string()));
        }
        self.index
            .insert(category.name().to_string(), self.categories.len());
        self.categories.push(category);
        Ok(())
    }

    /// Merges all categories of `other` into `self`
    ///
    /// Name conflicts are resolved according to `policy`:
    /// [`MergePolicy::LastWins`] replaces the existing member set in
    /// place, so the category keeps its original position.
    ///
    /// # Errors
    ///
    /// With [`MergePolicy::Reject`], the first duplicate name aborts the
    /// merge with [`MseaError::DuplicateCategory`]. Categories merged
    /// before the duplicate remain in `self`.
    pub fn merge(&mut self, other: AnnotationCatalog, policy: MergePolicy) -> MseaResult<()> {
        for category in other.categories {
            match self.index.get(category.name()) {
                Some(&pos) if policy == MergePolicy::LastWins => {
                    debug!("Replacing category {}", category.name());
                    self.categories[pos] = category;
                }
                Some(_) => {
                    return Err(MseaError::DuplicateCategory(category.name().to_string()));
                }
                None => {
                    self.index
                        .insert(category.name().to_string(), self.categories.len());
                    self.categories.push(category);
                }
            }
        }
        Ok(())
    }

    /// Returns the category with the given name, if present
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&pos| &self.categories[pos])
    }

    /// The number of categories in the catalog
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if the catalog contains no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// An iterator of all categories in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }
}

impl<'a> IntoIterator for &'a AnnotationCatalog {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;
    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn category(name: &str, compounds: &[&str]) -> Category {
        Category::new(name, compounds.iter().copied().collect())
    }

    fn make_catalog(categories: &[(&str, &[&str])]) -> AnnotationCatalog {
        let mut catalog = AnnotationCatalog::new();
        for (name, compounds) in categories {
            catalog.insert(category(name, compounds)).unwrap();
        }
        catalog
    }

    #[test]
    fn insertion_order_is_kept() {
        let catalog = make_catalog(&[("c", &["X"]), ("a", &["Y"]), ("b", &["Z"])]);
        let names: Vec<&str> = catalog.iter().map(Category::name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn duplicate_insert_fails() {
        let mut catalog = make_catalog(&[("glycolysis", &["X"])]);
        let err = catalog
            .insert(category("glycolysis", &["Y"]))
            .unwrap_err();
        assert!(matches!(err, MseaError::DuplicateCategory(name) if name == "glycolysis"));
    }

    #[test]
    fn merge_reject_on_conflict() {
        let mut catalog = make_catalog(&[("a", &["X"]), ("b", &["Y"])]);
        let other = make_catalog(&[("c", &["Z"]), ("b", &["W"])]);
        assert!(catalog.merge(other, MergePolicy::Reject).is_err());
    }

    #[test]
    fn merge_last_wins_keeps_position() {
        let mut catalog = make_catalog(&[("a", &["X"]), ("b", &["Y", "Z"])]);
        let other = make_catalog(&[("b", &["W"]), ("c", &["V"])]);
        catalog.merge(other, MergePolicy::LastWins).unwrap();

        let names: Vec<&str> = catalog.iter().map(Category::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(catalog.get("b").unwrap().len(), 1);
    }

    #[test]
    fn merge_updates_index() {
        let mut catalog = make_catalog(&[("a", &["X"])]);
        let other = make_catalog(&[("b", &["Y"])]);
        catalog.merge(other, MergePolicy::Reject).unwrap();
        assert_eq!(catalog.get("b").unwrap().name(), "b");
        assert_eq!(catalog.len(), 2);
    }
}
