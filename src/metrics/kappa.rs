//! Cohen's kappa with optional disagreement weighting.
//!
//! Categories are the sorted union of every rating seen in either sequence.
//! Weights are computed on category indices, so with contiguous integer
//! ratings the quadratic weight for a disagreement of `d` points is `d^2`.

use std::cmp::Ordering;

use crate::metrics::KappaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    Unweighted,
    Linear,
    Quadratic,
}

impl Weighting {
    fn weight(self, i: usize, j: usize) -> f64 {
        let d = i.abs_diff(j) as f64;
        match self {
            Weighting::Unweighted => {
                if i == j {
                    0.0
                } else {
                    1.0
                }
            }
            Weighting::Linear => d,
            Weighting::Quadratic => d * d,
        }
    }
}

/// Counts of (true category, predicted category) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    pub labels: Vec<f64>,
    counts: Vec<u64>,
}

impl ConfusionMatrix {
    pub fn n_labels(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, true_idx: usize, pred_idx: usize) -> u64 {
        self.counts[true_idx * self.n_labels() + pred_idx]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        let k = self.n_labels();
        (0..k)
            .map(|i| self.counts[i * k..(i + 1) * k].iter().sum())
            .collect()
    }

    pub fn col_totals(&self) -> Vec<u64> {
        let k = self.n_labels();
        (0..k)
            .map(|j| (0..k).map(|i| self.counts[i * k + j]).sum())
            .collect()
    }
}

pub fn confusion_matrix(y_true: &[f64], y_pred: &[f64]) -> Result<ConfusionMatrix, KappaError> {
    check_inputs(y_true, y_pred)?;

    let mut labels: Vec<f64> = y_true.iter().chain(y_pred).map(|&v| canonical(v)).collect();
    labels.sort_by(f64::total_cmp);
    labels.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);

    let k = labels.len();
    let mut counts = vec![0u64; k * k];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        let i = label_index(&labels, canonical(t));
        let j = label_index(&labels, canonical(p));
        counts[i * k + j] += 1;
    }

    Ok(ConfusionMatrix { labels, counts })
}

/// Folds -0.0 into 0.0 so both land in the same category.
fn canonical(v: f64) -> f64 {
    v + 0.0
}

fn label_index(labels: &[f64], value: f64) -> usize {
    labels
        .binary_search_by(|probe| probe.total_cmp(&value))
        .unwrap_or_else(|idx| idx)
}

fn check_inputs(y_true: &[f64], y_pred: &[f64]) -> Result<(), KappaError> {
    if y_true.len() != y_pred.len() {
        return Err(KappaError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    let n = y_true.len();
    if let Some(index) = y_true.iter().chain(y_pred).position(|v| !v.is_finite()) {
        return Err(KappaError::NonFinite { index: index % n });
    }
    Ok(())
}

/// `1 - sum(w * observed) / sum(w * expected)`, where `expected` is the
/// outer product of the marginal totals scaled to the sample size.
pub fn cohen_kappa(
    y_true: &[f64],
    y_pred: &[f64],
    weighting: Weighting,
) -> Result<f64, KappaError> {
    let matrix = confusion_matrix(y_true, y_pred)?;
    let k = matrix.n_labels();
    if k < 2 {
        return Err(KappaError::InsufficientCategories { found: k });
    }

    let n = matrix.total() as f64;
    let rows = matrix.row_totals();
    let cols = matrix.col_totals();

    let mut observed = 0.0;
    let mut expected = 0.0;
    for i in 0..k {
        for j in 0..k {
            let w = weighting.weight(i, j);
            observed += w * matrix.get(i, j) as f64;
            expected += w * (rows[i] as f64 * cols[j] as f64) / n;
        }
    }

    if expected == 0.0 {
        return Err(KappaError::InsufficientCategories { found: k });
    }
    Ok(1.0 - observed / expected)
}

/// Nearest integer, ties to even: 0.5 -> 0, 1.5 -> 2, 2.5 -> 2.
pub fn round_half_even(x: f64) -> f64 {
    x.round_ties_even()
}

/// Rounds `y_pred` half-to-even, leaves `y_true` untouched, then scores with
/// quadratic weights.
pub fn quadratic_weighted_kappa(y_true: &[f64], y_pred: &[f64]) -> Result<f64, KappaError> {
    check_inputs(y_true, y_pred)?;
    let rounded: Vec<f64> = y_pred.iter().map(|&v| round_half_even(v)).collect();
    cohen_kappa(y_true, &rounded, Weighting::Quadratic)
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/kappa.rs"]
mod tests;
