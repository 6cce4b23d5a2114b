//! Statistical analyses for annotation category enrichment
//!
//! This module contains the enrichment evaluation of annotation
//! categories within a compound query set ([`fisher`]) and the
//! multiple-testing correction of the resulting p-values
//! ([`correction`]).
//!
//! [`category_enrichment`] ties the two together for a whole
//! [`AnnotationCatalog`]: one [`Enrichment`] row per category, in
//! catalog order, so the p-value column can be corrected and re-zipped
//! onto the rows by position.
use tracing::{debug, error};

use crate::annotations::AnnotationCatalog;
use crate::CompoundSet;
use crate::MseaResult;

pub mod correction;
pub mod fisher;

/// The enrichment of one annotation category in the query set
///
/// `Enrichment` rows are returned by [`category_enrichment`] in catalog
/// order and are immutable after construction. The raw p-value is
/// uncorrected; use [`correction::benjamini_hochberg`] on the collected
/// p-value column for FDR control.
#[derive(Debug, Clone)]
pub struct Enrichment {
    category: String,
    pvalue: f64,
    count: u64,
    category_size: u64,
}

impl Enrichment {
    /// Constructs an `Enrichment` row for a named category
    pub fn new(category: &str, pvalue: f64, count: u64, category_size: u64) -> Self {
        Enrichment {
            category: category.to_string(),
            pvalue,
            count,
            category_size,
        }
    }

    /// The name of the tested category
    pub fn name(&self) -> &str {
        &self.category
    }

    /// The raw (uncorrected) p-value of the enrichment
    ///
    /// The p-value indicates the probability that the observed overlap
    /// between query set and category occured by chance
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// The number of query compounds annotated to the category
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The total number of compounds annotated to the category
    pub fn category_size(&self) -> u64 {
        self.category_size
    }
}

/// Calculates the enrichment of every catalog category in the query set
///
/// Categories are evaluated independently against the same query and
/// background sets and the resulting rows are returned in catalog
/// iteration order. The rows are not ranked; sorting by p-value is left
/// to the caller, as is the FDR correction of the p-value column.
///
/// # Errors
///
/// Fails with [`crate::MseaError::DegenerateTable`] if the exact test
/// rejects a category's contingency table. The failing category is
/// logged; callers that want to skip failing categories instead of
/// aborting can call [`fisher::evaluate`] per category themselves.
///
/// # Examples
///
/// ```
/// use msea::annotations::{AnnotationCatalog, Category};
/// use msea::stats::category_enrichment;
/// use msea::CompoundSet;
///
/// let query: CompoundSet = ["A", "B"].into_iter().collect();
/// let background: CompoundSet = ["A", "B", "C", "D"].into_iter().collect();
///
/// let mut catalog = AnnotationCatalog::new();
/// catalog
///     .insert(Category::new("foo", ["B", "C"].into_iter().collect()))
///     .unwrap();
///
/// let rows = category_enrichment(&query, &catalog, &background).unwrap();
/// assert_eq!(rows[0].name(), "foo");
/// assert_eq!(rows[0].count(), 1);
/// ```
pub fn category_enrichment(
    query: &CompoundSet,
    catalog: &AnnotationCatalog,
    background: &CompoundSet,
) -> MseaResult<Vec<Enrichment>> {
    let mut res = Vec::with_capacity(catalog.len());
    for category in catalog {
        debug!(
            "Evaluating category {} with {} compounds",
            category.name(),
            category.len()
        );
        let evaluation = fisher::evaluate(query, category.compounds(), background).map_err(
            |err| {
                error!("Evaluation of category {} failed: {}", category.name(), err);
                err
            },
        )?;
        res.push(Enrichment::new(
            category.name(),
            evaluation.pvalue(),
            evaluation.count(),
            evaluation.category_size(),
        ));
    }
    Ok(res)
}

#[cfg(test)]
mod test {
    use rayon::prelude::*;

    use super::*;
    use crate::annotations::Category;

    fn example_catalog() -> AnnotationCatalog {
        let mut catalog = AnnotationCatalog::new();
        for (name, compounds) in [
            ("one", vec!["B", "C", "D", "E"]),
            ("two", vec!["F", "G"]),
            ("three", vec!["A", "F"]),
            ("four", vec![]),
        ] {
            catalog
                .insert(Category::new(name, compounds.into_iter().collect()))
                .unwrap();
        }
        catalog
    }

    fn query() -> CompoundSet {
        ["A", "B", "C", "D", "E"].into_iter().collect()
    }

    fn background() -> CompoundSet {
        ["A", "B", "C", "D", "E", "F", "G", "H", "I"]
            .into_iter()
            .collect()
    }

    #[test]
    fn rows_follow_catalog_order() {
        let rows = category_enrichment(&query(), &example_catalog(), &background()).unwrap();
        let names: Vec<&str> = rows.iter().map(Enrichment::name).collect();
        assert_eq!(names, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn zero_overlap_categories_are_not_skipped() {
        let rows = category_enrichment(&query(), &example_catalog(), &background()).unwrap();
        assert_eq!(rows.len(), 4);
        // "two" and "four" have no overlap with the query
        assert_eq!(rows[1].pvalue(), 1.0);
        assert_eq!(rows[1].count(), 0);
        assert_eq!(rows[3].pvalue(), 1.0);
        assert_eq!(rows[3].category_size(), 0);
    }

    #[test]
    fn empty_catalog_yields_no_rows() {
        let catalog = AnnotationCatalog::new();
        let rows = category_enrichment(&query(), &catalog, &background()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn all_pvalues_in_range() {
        let rows = category_enrichment(&query(), &example_catalog(), &background()).unwrap();
        for row in &rows {
            assert!((0.0..=1.0).contains(&row.pvalue()));
        }
    }

    /// Per-category evaluations are independent, so they can run in
    /// parallel as long as the results are joined back into catalog
    /// order before correction.
    #[test]
    fn parallel_evaluation_matches_sequential() {
        let query = query();
        let background = background();
        let catalog = example_catalog();

        let sequential = category_enrichment(&query, &catalog, &background).unwrap();

        let categories: Vec<_> = catalog.iter().collect();
        let mut parallel: Vec<(usize, Enrichment)> = categories
            .par_iter()
            .enumerate()
            .map(|(pos, category)| {
                let evaluation =
                    fisher::evaluate(&query, category.compounds(), &background).unwrap();
                (
                    pos,
                    Enrichment::new(
                        category.name(),
                        evaluation.pvalue(),
                        evaluation.count(),
                        evaluation.category_size(),
                    ),
                )
            })
            .collect();
        parallel.sort_by_key(|(pos, _)| *pos);

        for ((_, par), seq) in parallel.iter().zip(&sequential) {
            assert_eq!(par.name(), seq.name());
            assert_eq!(par.pvalue(), seq.pvalue());
            assert_eq!(par.count(), seq.count());
            assert_eq!(par.category_size(), seq.category_size());
        }
    }
}
