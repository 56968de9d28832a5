/// Data layer: core types and the ranking stages.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (labels normalized, metrics coerced)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep records whose dimensions are all selected
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  percentile rank per metric, relative to the subset
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   rank    │  weighted score, stable descending rank
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  display table + xlsx bytes
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod rank;
