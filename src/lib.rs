//! Metabolite set enrichment analysis
//!
//! `msea` answers one question: given a set of compounds of interest
//! (e.g. metabolites detected in an experiment), a reference background
//! population and a catalog of named annotation categories (pathways,
//! chemical classes, ontology roles), which categories is the query set
//! enriched for?
//!
//! For every category, the crate builds a 2×2 contingency table from the
//! query/background/category memberships and computes a two-sided
//! Fisher exact-test p-value. The raw p-values of all tested categories
//! are then adjusted for multiple testing with the Benjamini-Hochberg
//! false-discovery-rate procedure.
//!
//! # Examples
//!
//! ```
//! use msea::annotations::{AnnotationCatalog, Category};
//! use msea::stats::{category_enrichment, correction};
//! use msea::CompoundSet;
//!
//! let query: CompoundSet = ["A", "B", "C", "D", "E"].into_iter().collect();
//! let background: CompoundSet = ["A", "B", "C", "D", "E", "F", "G", "H", "I"]
//!     .into_iter()
//!     .collect();
//!
//! let mut catalog = AnnotationCatalog::new();
//! catalog
//!     .insert(Category::new(
//!         "TCA cycle",
//!         ["B", "C", "D", "E"].into_iter().collect(),
//!     ))
//!     .unwrap();
//!
//! let rows = category_enrichment(&query, &catalog, &background).unwrap();
//! let pvalues: Vec<f64> = rows.iter().map(|row| row.pvalue()).collect();
//! let fdr = correction::benjamini_hochberg(&pvalues).unwrap();
//!
//! assert_eq!(rows[0].count(), 4);
//! assert!(fdr[0] >= rows[0].pvalue());
//! ```
use thiserror::Error;

pub mod annotations;
pub mod parser;
pub mod stats;
mod set;

pub use set::{CompoundId, CompoundSet};
pub use stats::Enrichment;

/// Error variants of the `msea` crate
#[derive(Error, Debug)]
pub enum MseaError {
    /// The exact-test primitive rejected the contingency table parameters
    #[error("degenerate contingency table: {0}")]
    DegenerateTable(String),
    /// A p-value outside of `[0.0, 1.0]` (or NaN) was passed to the corrector
    #[error("p-value out of range: {0}")]
    InvalidPValue(f64),
    /// A category with the same name already exists in the catalog
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),
    /// Invalid input data
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Failed to open or read a file
    #[error("unable to open file: {0}")]
    CannotOpenFile(String),
}

/// Crate-wide `Result` shorthand
pub type MseaResult<T> = Result<T, MseaError>;
