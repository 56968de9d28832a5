//! Percentile-rank normalisation of the four metrics.

use super::model::{Dataset, Metric, PerMetric, Record};

/// A record together with its normalised metrics, each in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub record: Record,
    pub norms: PerMetric<f64>,
}

/// Percentile rank of every value: average rank of ties divided by N.
/// Returns values in the same order as input.
///
/// A column with at most one distinct value maps to 0 everywhere, not 1.
pub fn percentile_rank(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let constant = order
        .first()
        .zip(order.last())
        .map_or(true, |(&lo, &hi)| values[lo] == values[hi]);
    if constant {
        return vec![0.0; n];
    }

    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // positions i..=j (0-based) share the mean of ranks i+1..=j+1
        let avg_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank / n as f64;
        }
        i = j + 1;
    }
    ranks
}

/// Attach per-metric percentile ranks, relative to the records passed in.
pub fn normalize(dataset: &Dataset) -> Vec<NormalizedRecord> {
    let mut norms = vec![PerMetric([0.0; 4]); dataset.len()];

    for metric in Metric::ALL {
        let column: Vec<f64> = dataset.records.iter().map(|r| r.metric(metric)).collect();
        for (slot, value) in norms.iter_mut().zip(percentile_rank(&column)) {
            slot[metric] = value;
        }
    }

    dataset
        .records
        .iter()
        .cloned()
        .zip(norms)
        .map(|(record, norms)| NormalizedRecord { record, norms })
        .collect()
}
