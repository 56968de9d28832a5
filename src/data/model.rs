use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Index, IndexMut};

// ---------------------------------------------------------------------------
// Cell – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what a spreadsheet can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Date/time cells are kept as text.
    Date(String),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            Cell::Float(v) => write!(f, "{v:.4}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Date(d) => write!(f, "{d}"),
            Cell::Null => Ok(()),
        }
    }
}

impl Cell {
    /// Numeric coercion: anything that is not a finite number becomes 0.
    pub fn coerce_f64(&self) -> f64 {
        let v = match self {
            Cell::Float(v) => *v,
            Cell::Integer(i) => *i as f64,
            Cell::Bool(b) => f64::from(u8::from(*b)),
            Cell::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Cell::Date(_) | Cell::Null => 0.0,
        };
        if v.is_finite() {
            v
        } else {
            0.0
        }
    }

    /// Text used for categorical membership. `None` means the value is absent.
    pub fn as_category(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::String(s) if s.trim().is_empty() => None,
            Cell::Float(v) if v.is_nan() => None,
            // lossless, unlike the 4-decimal display form
            Cell::Float(v) => Some(format!("{v}")),
            other => Some(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

// ---------------------------------------------------------------------------
// Dimensions and metrics
// ---------------------------------------------------------------------------

/// The four categorical attributes the user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Channel,
    ClientGroup,
    Category,
    SalesOffice,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Channel,
        Dimension::ClientGroup,
        Dimension::Category,
        Dimension::SalesOffice,
    ];

    /// Normalized source column label.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Channel => "nombre_canal",
            Dimension::ClientGroup => "nombre_g_cliente",
            Dimension::Category => "categoria",
            Dimension::SalesOffice => "nombre_oficina_ventas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Channel => "Channel",
            Dimension::ClientGroup => "Client group",
            Dimension::Category => "Category",
            Dimension::SalesOffice => "Sales office",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The four numeric attributes that feed the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Kilos,
    Sales,
    NumericDistribution,
    Caf,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Kilos,
        Metric::Sales,
        Metric::NumericDistribution,
        Metric::Caf,
    ];

    /// Normalized source column label.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Kilos => "kilos",
            Metric::Sales => "venta",
            Metric::NumericDistribution => "dn",
            Metric::Caf => "caf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Kilos => "Kilos",
            Metric::Sales => "Sales $",
            Metric::NumericDistribution => "Numeric distribution",
            Metric::Caf => "CAF",
        }
    }
}

/// One value per [`Metric`], indexable by the metric itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerMetric<T>(pub [T; 4]);

impl<T> Index<Metric> for PerMetric<T> {
    type Output = T;

    fn index(&self, metric: Metric) -> &T {
        &self.0[metric as usize]
    }
}

impl<T> IndexMut<Metric> for PerMetric<T> {
    fn index_mut(&mut self, metric: Metric) -> &mut T {
        &mut self.0[metric as usize]
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source sheet
// ---------------------------------------------------------------------------

/// A single portfolio row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Position in the source file; ties in the ranking fall back to it.
    pub row: usize,
    /// All cells in source column order. Metric columns hold the coerced value.
    pub cells: Vec<Cell>,
    dimensions: [Option<String>; 4],
    /// Coerced numeric attributes.
    pub metrics: PerMetric<f64>,
}

impl Record {
    pub fn new(
        row: usize,
        cells: Vec<Cell>,
        dimensions: [Option<String>; 4],
        metrics: PerMetric<f64>,
    ) -> Self {
        Self {
            row,
            cells,
            dimensions,
            metrics,
        }
    }

    /// The categorical value of `dim`, `None` when the cell is blank.
    pub fn dimension(&self, dim: Dimension) -> Option<&str> {
        self.dimensions[dim.index()].as_deref()
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics[metric]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded table
// ---------------------------------------------------------------------------

/// Distinct values of one dimension; `None` stands for a blank cell.
pub type DistinctValues = BTreeSet<Option<String>>;

/// An ordered table of records with pre-computed distinct values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Normalized column labels in source order.
    pub columns: Vec<String>,
    /// Rows in source order.
    pub records: Vec<Record>,
    /// For each dimension the sorted set of observed values.
    pub unique_values: BTreeMap<Dimension, DistinctValues>,
}

impl Dataset {
    /// Build the dimension indices from the given records.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique_values: BTreeMap<Dimension, DistinctValues> =
            Dimension::ALL.iter().map(|d| (*d, BTreeSet::new())).collect();

        for rec in &records {
            for dim in Dimension::ALL {
                unique_values
                    .entry(dim)
                    .or_default()
                    .insert(rec.dimension(dim).map(str::to_string));
            }
        }

        Dataset {
            columns,
            records,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn distinct(&self, dim: Dimension) -> &DistinctValues {
        // Every dimension is seeded in `new`.
        &self.unique_values[&dim]
    }
}
