use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use super::model::Cell;
use crate::error::ExportError;
use crate::pipeline::Ranking;

/// Default download name of the exported workbook.
pub const EXPORT_FILE_NAME: &str = "ranking_portafolio.xlsx";
/// MIME type of the exported workbook.
pub const EXPORT_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Name of the single worksheet in the export.
pub const EXPORT_SHEET: &str = "Ranking";

pub const SCORE_COLUMN: &str = "score";
pub const RANK_COLUMN: &str = "ranking";

/// The ranking as shown to the user: rows ascending by rank, helper columns gone.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DisplayTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the on-screen table and the xlsx byte stream from one ranking.
pub fn present(ranking: &Ranking) -> Result<(DisplayTable, Vec<u8>), ExportError> {
    let table = display_table(ranking);
    let bytes = to_xlsx(&table)?;
    Ok((table, bytes))
}

/// Source columns, then score and rank; sorted ascending by rank.
pub fn display_table(ranking: &Ranking) -> DisplayTable {
    let mut columns = ranking.columns.clone();
    columns.push(SCORE_COLUMN.to_string());
    columns.push(RANK_COLUMN.to_string());

    let mut ordered: Vec<_> = ranking.rows.iter().collect();
    ordered.sort_by_key(|s| s.rank);

    let rows = ordered
        .into_iter()
        .map(|scored| {
            let mut cells = scored.record.cells.clone();
            cells.push(Cell::Float(scored.score));
            cells.push(Cell::Integer(scored.rank as i64));
            cells
        })
        .collect();

    DisplayTable { columns, rows }
}

/// Serialize the table to a single-sheet workbook, header row first, no index.
pub fn to_xlsx(table: &DisplayTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET)?;

    for (c, name) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, column_index(c)?, name, &header)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let r = u32::try_from(r + 1).map_err(|_| ExportError::TooLarge(format!("row {r}")))?;
        for (c, cell) in row.iter().enumerate() {
            let c = column_index(c)?;
            match cell {
                Cell::String(s) | Cell::Date(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Cell::Integer(i) => {
                    sheet.write_number(r, c, *i as f64)?;
                }
                Cell::Float(v) => {
                    sheet.write_number(r, c, *v)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                Cell::Null => {}
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    log::debug!("Serialized {} ranking rows ({} bytes)", table.len(), bytes.len());
    Ok(bytes)
}

/// Write an exported workbook to disk.
pub fn save_export(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes)?;
    log::info!("Exported ranking to {}", path.display());
    Ok(())
}

fn column_index(c: usize) -> Result<u16, ExportError> {
    u16::try_from(c).map_err(|_| ExportError::TooLarge(format!("column {c}")))
}
