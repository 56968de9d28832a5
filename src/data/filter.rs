use std::collections::BTreeMap;

use super::model::{Dataset, Dimension, DistinctValues};

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: maps dimension → set of allowed values.
/// `None` inside a set stands for blank cells; it only matches when present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSelection {
    selected: BTreeMap<Dimension, DistinctValues>,
}

impl FilterSelection {
    /// Everything observed in `dataset` is allowed, except blank sales offices.
    pub fn all(dataset: &Dataset) -> Self {
        let selected = Dimension::ALL
            .iter()
            .map(|dim| (*dim, default_values(dataset, *dim)))
            .collect();
        Self { selected }
    }

    /// The allowed values of `dim`. A dimension never set allows nothing.
    pub fn values(&self, dim: Dimension) -> Option<&DistinctValues> {
        self.selected.get(&dim)
    }

    pub fn set(&mut self, dim: Dimension, values: DistinctValues) {
        self.selected.insert(dim, values);
    }

    pub fn contains(&self, dim: Dimension, value: Option<&str>) -> bool {
        self.selected
            .get(&dim)
            .is_some_and(|set| set.contains(&value.map(str::to_string)))
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle(&mut self, dim: Dimension, value: &Option<String>) {
        let set = self.selected.entry(dim).or_default();
        if !set.remove(value) {
            set.insert(value.clone());
        }
    }

    /// Reset `dim` to its default: every observed value, blank offices excluded.
    pub fn select_all(&mut self, dataset: &Dataset, dim: Dimension) {
        self.selected.insert(dim, default_values(dataset, dim));
    }

    /// Deselect all values of `dim`.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selected.insert(dim, DistinctValues::new());
    }
}

/// Observed values of `dim`. Blank sales offices are only ever selected explicitly.
fn default_values(dataset: &Dataset, dim: Dimension) -> DistinctValues {
    let mut vals = dataset.distinct(dim).clone();
    if dim == Dimension::SalesOffice {
        vals.remove(&None);
    }
    vals
}

/// Return indices of records whose four dimensions are all selected.
///
/// An empty or missing set for any dimension hides every record.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            Dimension::ALL
                .iter()
                .all(|dim| selection.contains(*dim, rec.dimension(*dim)))
        })
        .map(|(i, _)| i)
        .collect()
}

/// The subset of `dataset` passing `selection`, in original order.
pub fn filter(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    let records = filtered_indices(dataset, selection)
        .into_iter()
        .map(|i| dataset.records[i].clone())
        .collect();
    let out = Dataset::new(dataset.columns.clone(), records);
    log::debug!("Filter kept {} of {} records", out.len(), dataset.len());
    out
}
