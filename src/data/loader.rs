use std::collections::BTreeMap;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_auto, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, Dataset, Dimension, Metric, PerMetric, Record};
use crate::error::LoadError;

/// Header row plus untyped body, before any schema handling.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a portfolio dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet, first row is the header
/// * `.csv`  – header row, one record per line
/// * `.json` – `[{ "kilos": 10, "categoria": "A", ... }, ...]`
/// * `.parquet` – flat columns
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_spreadsheet(path),
        "csv" => read_csv(path),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    }
    .map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })?;

    let dataset = build_dataset(raw.headers, raw.rows)?;
    log::info!(
        "Loaded {} records from {} ({} columns)",
        dataset.len(),
        path.display(),
        dataset.columns.len()
    );
    Ok(dataset)
}

/// Load the first worksheet of an in-memory `.xlsx` workbook.
pub fn load_xlsx_reader<RS: Read + Seek>(reader: RS) -> Result<Dataset, LoadError> {
    let raw = read_xlsx(reader).map_err(|e| LoadError::Unreadable {
        path: "<memory>".into(),
        reason: format!("{e:#}"),
    })?;
    build_dataset(raw.headers, raw.rows)
}

/// Normalize a column label: trim, lowercase, spaces to underscores.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Turn a header row and body cells into a [`Dataset`].
///
/// Column labels are normalized, the eight pipeline columns must be present,
/// and the four metric columns are coerced to numbers in place.
pub fn build_dataset(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Dataset, LoadError> {
    let columns: Vec<String> = headers.iter().map(|h| normalize_label(h)).collect();
    let position = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };

    let mut metric_idx = PerMetric([0usize; 4]);
    for metric in Metric::ALL {
        metric_idx[metric] = position(metric.column())?;
    }
    let mut dim_idx = [0usize; 4];
    for (slot, dim) in dim_idx.iter_mut().zip(Dimension::ALL) {
        *slot = position(dim.column())?;
    }

    let width = columns.len();
    let records: Vec<Record> = rows
        .into_iter()
        .filter(|cells| cells.iter().any(|c| !c.is_null()))
        .enumerate()
        .map(|(row, mut cells)| {
            if cells.len() > width {
                log::warn!(
                    "Row {row} has {} cells but only {width} columns; extra cells dropped",
                    cells.len()
                );
            }
            cells.resize(width, Cell::Null);

            let mut metrics = PerMetric([0.0; 4]);
            for metric in Metric::ALL {
                let idx = metric_idx[metric];
                let value = cells[idx].coerce_f64();
                cells[idx] = Cell::Float(value);
                metrics[metric] = value;
            }
            let dimensions = dim_idx.map(|idx| cells[idx].as_category());

            Record::new(row, cells, dimensions, metrics)
        })
        .collect();

    Ok(Dataset::new(columns, records))
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn read_spreadsheet(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;
    Ok(range_to_table(&range))
}

fn read_xlsx<RS: Read + Seek>(reader: RS) -> Result<RawTable> {
    let mut workbook: Xlsx<RS> = open_workbook_from_rs(reader).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;
    Ok(range_to_table(&range))
}

fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let rows = rows.map(|r| r.iter().map(data_to_cell).collect()).collect();
    RawTable { headers, rows }
}

fn data_to_cell(value: &Data) -> Cell {
    match value {
        Data::String(s) if s.is_empty() => Cell::Null,
        Data::String(s) => Cell::String(s.clone()),
        Data::Float(f) => Cell::Float(*f),
        Data::Int(i) => Cell::Integer(*i),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            Cell::Date(value.to_string())
        }
        Data::Error(_) | Data::Empty => Cell::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, ragged rows allowed.
fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(RawTable { headers, rows })
}

fn guess_cell_type(s: &str) -> Cell {
    if s.is_empty() {
        return Cell::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Cell::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Cell::Float(f);
    }
    if s == "true" || s == "false" {
        return Cell::Bool(s == "true");
    }
    Cell::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema: an array of flat objects, one per row.
/// Keys within an object come out sorted; new keys from later rows are appended.
fn read_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut parsed: Vec<BTreeMap<&str, Cell>> = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
            row.insert(key.as_str(), json_to_cell(val));
        }
        parsed.push(row);
    }

    let rows = parsed
        .into_iter()
        .map(|mut row| {
            headers
                .iter()
                .map(|h| row.remove(h.as_str()).unwrap_or(Cell::Null))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per attribute.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawTable { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        other => Cell::String(format!("{other:?}")),
    }
}
