//! Evaluates the enrichment of one annotation category in the query set
//!
//! The evaluation builds a 2×2 contingency table from the query,
//! background and category member sets and runs a two-sided Fisher
//! exact test on it. A query with no overlap with the category is
//! definitionally not enriched and short-circuits to a p-value of 1.0
//! without touching the test at all.
//!
//! # Examples
//!
//! ```
//! use msea::stats::fisher::evaluate;
//! use msea::CompoundSet;
//!
//! let query: CompoundSet = ["A", "B", "C", "D", "E"].into_iter().collect();
//! let background: CompoundSet = ["A", "B", "C", "D", "E", "F", "G", "H", "I"]
//!     .into_iter()
//!     .collect();
//! let category: CompoundSet = ["B", "C", "D", "E"].into_iter().collect();
//!
//! let evaluation = evaluate(&query, &category, &background).unwrap();
//!
//! assert_eq!(evaluation.count(), 4);
//! assert_eq!(evaluation.category_size(), 4);
//! assert!((evaluation.pvalue() - 0.3006993006993007).abs() < 1e-9);
//! ```
use statrs::distribution::{Discrete, Hypergeometric};
use statrs::statistics::{Max, Min};
use tracing::debug;

use crate::CompoundSet;
use crate::MseaError;
use crate::MseaResult;

/// Tables as probable as the observed one count towards the two-sided
/// p-value. The comparison uses a small relative tolerance so that
/// floating point noise does not exclude exact ties.
const RELATIVE_ERROR: f64 = 1.0 + 1e-7;

/// The 2×2 contingency table of one category evaluation
///
/// Rows are {in category, not in category}, columns are
/// {query, background}:
///
/// | | query | background |
/// | --- | --- | --- |
/// | in category | a | b |
/// | not in category | c | d |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    query_in_category: u64,
    background_in_category: u64,
    query_not_in_category: u64,
    background_not_in_category: u64,
}

impl ContingencyTable {
    /// Derives the table from the three compound sets
    ///
    /// The counts are pure set cardinalities; the table does not require
    /// (or check) that the query or the category members are contained
    /// in the background.
    pub fn from_sets(
        query: &CompoundSet,
        category_members: &CompoundSet,
        background: &CompoundSet,
    ) -> Self {
        ContingencyTable {
            query_in_category: query.intersection_count(category_members),
            background_in_category: background.intersection_count(category_members),
            query_not_in_category: query.difference_count(category_members),
            background_not_in_category: background.difference_count(category_members),
        }
    }

    /// The number of query compounds in the category (cell `a`)
    pub fn query_in_category(&self) -> u64 {
        self.query_in_category
    }

    /// The sum of all four cells (`N`)
    fn population(&self) -> u64 {
        self.query_in_category
            + self.background_in_category
            + self.query_not_in_category
            + self.background_not_in_category
    }

    /// The first row total, i.e. all counted in-category compounds (`K`)
    fn in_category(&self) -> u64 {
        self.query_in_category + self.background_in_category
    }

    /// The first column total, i.e. the counted query compounds (`n`)
    fn query_total(&self) -> u64 {
        self.query_in_category + self.query_not_in_category
    }
}

/// The outcome of one category evaluation
///
/// Holds the two-sided p-value together with the overlap count and the
/// category size, ready to be attached to a category name in an
/// [`crate::Enrichment`] row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pvalue: f64,
    count: u64,
    category_size: u64,
}

impl Evaluation {
    /// The two-sided Fisher exact-test p-value
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// The number of query compounds that are category members
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The total number of category members
    pub fn category_size(&self) -> u64 {
        self.category_size
    }
}

/// Evaluates the enrichment of the category members in the query set
///
/// If query and category do not overlap at all, the category cannot be
/// enriched and the evaluation returns a p-value of exactly 1.0 without
/// running the test. Empty query sets, empty categories and empty
/// backgrounds are all valid inputs and take either this short-circuit
/// or a well-defined degenerate table (see the tests).
///
/// # Errors
///
/// Returns [`MseaError::DegenerateTable`] if the hypergeometric
/// primitive rejects the table parameters. With tables derived through
/// [`ContingencyTable::from_sets`] the parameters are always valid, so
/// this only guards against hand-built inconsistent tables.
pub fn evaluate(
    query: &CompoundSet,
    category_members: &CompoundSet,
    background: &CompoundSet,
) -> MseaResult<Evaluation> {
    let category_size = category_members.cardinality();
    let count = query.intersection_count(category_members);
    if count == 0 {
        debug!("No overlap between query and category, skipping test");
        return Ok(Evaluation {
            pvalue: 1.0,
            count: 0,
            category_size,
        });
    }

    let table = ContingencyTable::from_sets(query, category_members, background);
    debug!(
        "Contingency table: [[{}, {}], [{}, {}]]",
        table.query_in_category,
        table.background_in_category,
        table.query_not_in_category,
        table.background_not_in_category
    );
    let pvalue = fisher_exact(&table)?;

    Ok(Evaluation {
        pvalue,
        count,
        category_size,
    })
}

/// Calculates the two-sided Fisher exact-test p-value of the table
///
/// With the margins fixed, the count in cell `a` follows a
/// hypergeometric distribution `X ~ Hypergeometric(N, K, n)`. The
/// two-sided p-value is the total probability of all tables that are at
/// most as probable as the observed one:
///
/// ```text
/// p = Σ pmf(k)  over all k in the support with pmf(k) <= pmf(a)
/// ```
///
/// # Errors
///
/// Returns [`MseaError::DegenerateTable`] if the distribution cannot be
/// constructed from the table margins
pub fn fisher_exact(table: &ContingencyTable) -> MseaResult<f64> {
    let dist = Hypergeometric::new(
        // Total number of counted compounds ==> population
        table.population(),
        // Compounds in the category ==> successes
        table.in_category(),
        // Compounds in the query ==> draws
        table.query_total(),
    )
    .map_err(|err| MseaError::DegenerateTable(err.to_string()))?;

    let observed = dist.pmf(table.query_in_category());
    let cutoff = observed * RELATIVE_ERROR;

    let pvalue = (dist.min()..=dist.max())
        .map(|k| dist.pmf(k))
        .filter(|p| *p <= cutoff)
        .sum::<f64>();

    // summation noise can push the total marginally above 1.0
    Ok(pvalue.min(1.0))
}
