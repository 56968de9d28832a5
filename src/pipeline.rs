use crate::data::filter::{filter, FilterSelection};
use crate::data::model::Dataset;
use crate::data::normalize::normalize;
use crate::data::rank::{score_and_rank, ScoredRecord, Weights};

/// Scored records of one pipeline run, in original dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub columns: Vec<String>,
    pub rows: Vec<ScoredRecord>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Filter, normalise, score and rank. Pure; call again whenever an input changes.
pub fn run_pipeline(dataset: &Dataset, selection: &FilterSelection, weights: &Weights) -> Ranking {
    let subset = filter(dataset, selection);
    let rows = score_and_rank(normalize(&subset), weights);
    log::debug!(
        "Ranked {} records with weights totalling {}%",
        rows.len(),
        weights.total()
    );

    Ranking {
        columns: subset.columns,
        rows,
    }
}
