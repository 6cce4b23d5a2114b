//! Multiple-testing correction of enrichment p-values
//!
//! Testing every category of a catalog means running many hypothesis
//! tests on the same query set, so the raw p-values must be adjusted.
//! [`benjamini_hochberg`] controls the false discovery rate, the
//! expected proportion of false positives among the categories reported
//! as enriched.
use crate::MseaError;
use crate::MseaResult;

/// Adjusts p-values with the Benjamini-Hochberg procedure
///
/// The adjusted values are returned in the same order as the input, so
/// `output[i]` belongs to the category that produced `pvalues[i]`. The
/// procedure sorts the p-values internally to assign ranks, computes
/// `p * m / rank`, enforces monotonicity with a running minimum from the
/// largest rank down and clips to `[0, 1]` before mapping everything
/// back to the input positions. Ties are handled like any other value.
///
/// An empty input yields an empty output; a single p-value is returned
/// unchanged (clipped to `[0, 1]`).
///
/// # Errors
///
/// Returns [`MseaError::InvalidPValue`] if any input is NaN or outside
/// of `[0, 1]`
///
/// # Examples
///
/// ```
/// use msea::stats::correction::benjamini_hochberg;
///
/// let adjusted = benjamini_hochberg(&[0.5, 0.01, 0.2]).unwrap();
///
/// assert_eq!(adjusted, vec![0.5, 0.03, 0.30000000000000004]);
/// ```
pub fn benjamini_hochberg(pvalues: &[f64]) -> MseaResult<Vec<f64>> {
    for &pvalue in pvalues {
        if pvalue.is_nan() || !(0.0..=1.0).contains(&pvalue) {
            return Err(MseaError::InvalidPValue(pvalue));
        }
    }

    let m = pvalues.len();
    if m == 0 {
        return Ok(Vec::new());
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| pvalues[a].total_cmp(&pvalues[b]));

    let mut adjusted = vec![0.0; m];
    let mut running_min = f64::INFINITY;
    for rank in (1..=m).rev() {
        let pos = order[rank - 1];
        let value = (pvalues[pos] * m as f64 / rank as f64).min(1.0);
        running_min = running_min.min(value);
        adjusted[pos] = running_min;
    }

    Ok(adjusted)
}
