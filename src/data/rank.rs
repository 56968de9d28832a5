//! Weighted composite score and ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{Metric, PerMetric, Record};
use super::normalize::NormalizedRecord;

/// Upper bound of a single weight, in percent.
pub const MAX_WEIGHT: u8 = 100;

/// User-adjustable percentage per metric. Each weight is in [0, 100];
/// the total is free to drift from 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub kilos: u8,
    pub sales: u8,
    pub numeric_distribution: u8,
    pub caf: u8,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            kilos: 25,
            sales: 25,
            numeric_distribution: 25,
            caf: 25,
        }
    }
}

impl Weights {
    /// Build from raw percentages, clamping each to [0, 100].
    pub fn new(kilos: u8, sales: u8, numeric_distribution: u8, caf: u8) -> Self {
        Self {
            kilos: kilos.min(MAX_WEIGHT),
            sales: sales.min(MAX_WEIGHT),
            numeric_distribution: numeric_distribution.min(MAX_WEIGHT),
            caf: caf.min(MAX_WEIGHT),
        }
    }

    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Kilos => self.kilos,
            Metric::Sales => self.sales,
            Metric::NumericDistribution => self.numeric_distribution,
            Metric::Caf => self.caf,
        }
    }

    pub fn get_mut(&mut self, metric: Metric) -> &mut u8 {
        match metric {
            Metric::Kilos => &mut self.kilos,
            Metric::Sales => &mut self.sales,
            Metric::NumericDistribution => &mut self.numeric_distribution,
            Metric::Caf => &mut self.caf,
        }
    }

    pub fn total(&self) -> u32 {
        Metric::ALL.iter().map(|m| u32::from(self.get(*m))).sum()
    }

    /// A warning when the weights do not add up to 100.
    pub fn warning(&self) -> Option<ConfigWarning> {
        let total = self.total();
        (total != 100).then_some(ConfigWarning::WeightsDoNotSumTo100 { total })
    }
}

/// Non-fatal configuration issue; scoring proceeds regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    WeightsDoNotSumTo100 { total: u32 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::WeightsDoNotSumTo100 { total } => {
                write!(f, "Weights add up to {total}%, adjust them to 100%")
            }
        }
    }
}

/// A record with its composite score and 1-based rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: Record,
    pub norms: PerMetric<f64>,
    pub score: f64,
    pub rank: usize,
}

/// `Σ norm × weight / 100` over the four metrics.
pub fn composite_score(norms: &PerMetric<f64>, weights: &Weights) -> f64 {
    Metric::ALL
        .iter()
        .map(|m| norms[*m] * f64::from(weights.get(*m)))
        .sum::<f64>()
        / 100.0
}

/// Score every record and rank by descending score.
///
/// Equal scores keep input order, so ranks are always a permutation of 1..=N.
/// Output stays in input order.
pub fn score_and_rank(records: Vec<NormalizedRecord>, weights: &Weights) -> Vec<ScoredRecord> {
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|nr| ScoredRecord {
            score: composite_score(&nr.norms, weights),
            record: nr.record,
            norms: nr.norms,
            rank: 0,
        })
        .collect();

    let mut order: Vec<usize> = (0..scored.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| scored[b].score.total_cmp(&scored[a].score));
    for (position, idx) in order.into_iter().enumerate() {
        scored[idx].rank = position + 1;
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn normalized(row: usize, norms: [f64; 4]) -> NormalizedRecord {
        NormalizedRecord {
            record: Record::new(row, vec![Cell::Null], Default::default(), PerMetric([0.0; 4])),
            norms: PerMetric(norms),
        }
    }

    #[test]
    fn score_is_weighted_sum_over_100() {
        let norms = PerMetric([1.0, 0.5, 0.0, 0.25]);
        let w = Weights::new(40, 20, 30, 10);
        let expected = (1.0 * 40.0 + 0.5 * 20.0 + 0.25 * 10.0) / 100.0;
        assert!((composite_score(&norms, &w) - expected).abs() < 1e-12);
    }

    #[test]
    fn ties_rank_in_original_order() {
        let scored = score_and_rank(
            vec![
                normalized(0, [0.5; 4]),
                normalized(1, [1.0; 4]),
                normalized(2, [0.5; 4]),
            ],
            &Weights::default(),
        );
        let ranks: Vec<usize> = scored.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![2, 1, 3]);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(score_and_rank(Vec::new(), &Weights::default()).is_empty());
    }

    #[test]
    fn weights_are_clamped_and_checked() {
        let w = Weights::new(200, 0, 0, 0);
        assert_eq!(w.kilos, 100);
        assert_eq!(w.warning(), None);
        assert_eq!(Weights::default().warning(), None);
        assert_eq!(
            Weights::new(10, 10, 10, 10).warning(),
            Some(ConfigWarning::WeightsDoNotSumTo100 { total: 40 })
        );
    }
}
