mod common;

use std::io::{Cursor, Write};

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rstest::rstest;

use common::{dataset, sample_rows, xlsx_bytes, Row};
use portfolio_ranker::data::export::{present, EXPORT_SHEET, RANK_COLUMN, SCORE_COLUMN};
use portfolio_ranker::data::filter::{filtered_indices, FilterSelection};
use portfolio_ranker::data::loader::{load_file, load_xlsx_reader};
use portfolio_ranker::data::model::{Cell, Dimension, Metric};
use portfolio_ranker::data::rank::{ConfigWarning, Weights};
use portfolio_ranker::error::LoadError;
use portfolio_ranker::pipeline::run_pipeline;

fn row(kilos: f64, caf: f64) -> Row<'static> {
    ("Moderno", "Exito", "Cocoa", Some("Bogota"), kilos, 1.0, 1.0, caf)
}

// --- SCENARIOS ---

#[test]
fn test_tied_kilos_share_percentile_and_top_value_ranks_first() {
    let ds = dataset(&[row(10.0, 1.0), row(10.0, 2.0), row(20.0, 3.0)]);
    let ranking = run_pipeline(&ds, &FilterSelection::all(&ds), &Weights::new(100, 0, 0, 0));

    let norms: Vec<f64> = ranking.rows.iter().map(|s| s.norms[Metric::Kilos]).collect();
    assert_eq!(norms[0], norms[1]);
    assert!(norms[0] < norms[2]);
    assert_eq!(ranking.rows[2].rank, 1);
    // equal scores: earlier row wins
    assert_eq!(ranking.rows[0].rank, 2);
    assert_eq!(ranking.rows[1].rank, 3);
}

#[test]
fn test_constant_metric_normalizes_to_zero() {
    let ds = dataset(&[row(1.0, 5.0), row(2.0, 5.0), row(3.0, 5.0)]);
    let ranking = run_pipeline(&ds, &FilterSelection::all(&ds), &Weights::new(0, 0, 0, 100));

    for scored in &ranking.rows {
        assert_eq!(scored.norms[Metric::Caf], 0.0);
        assert_eq!(scored.score, 0.0);
    }
}

#[test]
fn test_excluding_a_category_rescores_the_rest() {
    let ds = dataset(&sample_rows());
    let all = FilterSelection::all(&ds);
    let baseline = run_pipeline(&ds, &all, &Weights::default());

    let mut sel = all.clone();
    sel.toggle(Dimension::Category, &Some("Cocoa".to_string()));
    let ranking = run_pipeline(&ds, &sel, &Weights::default());

    let cocoa = baseline
        .rows
        .iter()
        .filter(|s| s.record.dimension(Dimension::Category) == Some("Cocoa"))
        .count();
    assert_eq!(ranking.len(), baseline.len() - cocoa);

    let mut ranks: Vec<usize> = ranking.rows.iter().map(|s| s.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, (1..=ranking.len()).collect::<Vec<_>>());
    // normalisation is relative to the visible rows only
    assert!(ranking.rows.iter().any(|s| s.norms[Metric::Kilos] == 1.0));
}

#[test]
fn test_office_select_all_leaves_blank_offices_out() {
    let ds = dataset(&sample_rows());
    let mut sel = FilterSelection::all(&ds);
    let default_kept = filtered_indices(&ds, &sel);
    assert_eq!(default_kept, vec![0, 1, 2, 4]);

    sel.select_none(Dimension::SalesOffice);
    sel.select_all(&ds, Dimension::SalesOffice);
    assert_eq!(filtered_indices(&ds, &sel), default_kept);

    // only the explicit blank entry brings row 3 back
    sel.toggle(Dimension::SalesOffice, &None);
    assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2, 3, 4]);
}

#[rstest]
#[case(Weights::new(25, 25, 25, 25), None)]
#[case(Weights::new(100, 0, 0, 0), None)]
#[case(Weights::new(10, 10, 10, 10), Some(40))]
#[case(Weights::new(50, 50, 50, 0), Some(150))]
fn test_weight_total_warning(#[case] weights: Weights, #[case] warned_total: Option<u32>) {
    assert_eq!(
        weights.warning(),
        warned_total.map(|total| ConfigWarning::WeightsDoNotSumTo100 { total })
    );

    // scoring proceeds regardless
    let ds = dataset(&sample_rows());
    let ranking = run_pipeline(&ds, &FilterSelection::all(&ds), &weights);
    assert_eq!(ranking.len(), 4);
}

#[test]
fn test_uniformly_scaled_weights_keep_order() {
    let ds = dataset(&sample_rows());
    let sel = FilterSelection::all(&ds);
    let full = run_pipeline(&ds, &sel, &Weights::new(25, 25, 25, 25));
    let scaled = run_pipeline(&ds, &sel, &Weights::new(10, 10, 10, 10));

    for (a, b) in full.rows.iter().zip(&scaled.rows) {
        assert_eq!(a.rank, b.rank);
        assert!((a.score * 0.4 - b.score).abs() < 1e-12);
    }
}

#[test]
fn test_empty_selection_produces_empty_ranking_and_export() {
    let ds = dataset(&sample_rows());
    let mut sel = FilterSelection::all(&ds);
    sel.select_none(Dimension::Channel);

    let ranking = run_pipeline(&ds, &sel, &Weights::default());
    assert!(ranking.is_empty());

    let (table, bytes) = present(&ranking).unwrap();
    assert!(table.is_empty());
    let parsed = read_export(&bytes);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0], table.columns);
}

// --- EXPORT ---

fn read_export(bytes: &[u8]) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec())).unwrap();
    assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET.to_string()]);
    let range = workbook.worksheet_range(EXPORT_SHEET).unwrap();
    range
        .rows()
        .map(|r| r.iter().map(data_text).collect())
        .collect()
}

fn data_text(d: &Data) -> String {
    match d {
        Data::Float(f) => Cell::Float(*f).to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[test]
fn test_export_round_trip_matches_display_table() {
    let ds = dataset(&sample_rows());
    let mut sel = FilterSelection::all(&ds);
    sel.toggle(Dimension::SalesOffice, &None);
    let ranking = run_pipeline(&ds, &sel, &Weights::new(40, 30, 20, 10));

    let (table, bytes) = present(&ranking).unwrap();
    let parsed = read_export(&bytes);

    assert_eq!(parsed[0], table.columns);
    assert_eq!(parsed.len() - 1, table.len());
    for (sheet_row, table_row) in parsed[1..].iter().zip(&table.rows) {
        let expected: Vec<String> = table_row.iter().map(Cell::to_string).collect();
        assert_eq!(sheet_row, &expected);
    }
}

#[test]
fn test_display_table_is_sorted_and_drops_helpers() {
    let ds = dataset(&sample_rows());
    let ranking = run_pipeline(&ds, &FilterSelection::all(&ds), &Weights::default());
    let (table, _) = present(&ranking).unwrap();

    assert!(!table.columns.iter().any(|c| c.ends_with("_norm")));
    assert_eq!(&table.columns[table.columns.len() - 2..], [SCORE_COLUMN, RANK_COLUMN]);

    let rank_idx = table.columns.len() - 1;
    let ranks: Vec<Cell> = table.rows.iter().map(|r| r[rank_idx].clone()).collect();
    assert_eq!(
        ranks,
        (1..=table.len() as i64).map(Cell::Integer).collect::<Vec<_>>()
    );

    // presenting twice gives the same table
    assert_eq!(present(&ranking).unwrap().0, table);
}

// --- LOADERS ---

#[test]
fn test_xlsx_file_loads_like_in_memory_table() {
    let rows = sample_rows();
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&xlsx_bytes(&rows)).unwrap();

    let loaded = load_file(file.path()).unwrap();
    assert_eq!(loaded, dataset(&rows));
    assert_eq!(load_xlsx_reader(Cursor::new(xlsx_bytes(&rows))).unwrap(), loaded);
}

#[test]
fn test_xlsx_missing_column_is_schema_error() {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (c, h) in ["nombre_canal", "kilos"].iter().enumerate() {
        sheet.write_string(0, c as u16, *h).unwrap();
    }
    let bytes = workbook.save_to_buffer().unwrap();

    let err = load_xlsx_reader(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "venta"));
}

#[test]
fn test_header_only_source_is_empty_not_error() {
    let ds = load_xlsx_reader(Cursor::new(xlsx_bytes(&[]))).unwrap();
    assert!(ds.is_empty());
    assert!(run_pipeline(&ds, &FilterSelection::all(&ds), &Weights::default()).is_empty());
}

#[test]
fn test_csv_source_coerces_bad_numbers() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Nombre Canal,Nombre G Cliente,Categoria,Nombre Oficina Ventas,Kilos,Venta,DN,CAF").unwrap();
    writeln!(file, "Moderno,Exito,Cocoa,Bogota,n/d,100,0.5,3").unwrap();
    writeln!(file, "Moderno,Exito,Cocoa,,12,,0.25,x").unwrap();

    let ds = load_file(file.path()).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records[0].metric(Metric::Kilos), 0.0);
    assert_eq!(ds.records[1].metric(Metric::Kilos), 12.0);
    assert_eq!(ds.records[1].metric(Metric::Sales), 0.0);
    assert_eq!(ds.records[1].metric(Metric::Caf), 0.0);
    assert_eq!(ds.records[1].dimension(Dimension::SalesOffice), None);
}

#[test]
fn test_json_source_loads_records() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[
            {{"nombre_canal": "Moderno", "nombre_g_cliente": "Exito", "categoria": "Cocoa",
              "nombre_oficina_ventas": null, "kilos": 10, "venta": "7.5", "dn": 0.5, "caf": true}}
        ]"#
    )
    .unwrap();

    let ds = load_file(file.path()).unwrap();
    let mut sorted = ds.columns.clone();
    sorted.sort();
    assert_eq!(ds.columns, sorted);
    let rec = &ds.records[0];
    assert_eq!(rec.metric(Metric::Kilos), 10.0);
    assert_eq!(rec.metric(Metric::Sales), 7.5);
    assert_eq!(rec.metric(Metric::Caf), 1.0);
    assert_eq!(rec.dimension(Dimension::SalesOffice), None);
}

#[test]
fn test_parquet_source_loads_records() {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    let text = |v: Vec<Option<&str>>| Arc::new(StringArray::from(v)) as ArrayRef;
    let batch = RecordBatch::try_from_iter(vec![
        ("Nombre Canal", text(vec![Some("Moderno"), Some("Tradicional")])),
        ("Nombre G Cliente", text(vec![Some("Exito"), Some("D1")])),
        ("Categoria", text(vec![Some("Cocoa"), Some("Cocoa")])),
        ("Nombre Oficina Ventas", text(vec![Some("Cali"), None])),
        ("Kilos", Arc::new(Int64Array::from(vec![5, 9])) as ArrayRef),
        ("Venta", Arc::new(Float64Array::from(vec![Some(1.5), None])) as ArrayRef),
        ("DN", text(vec![Some("0.3"), Some("abc")])),
        ("CAF", Arc::new(Float64Array::from(vec![2.0, 4.0])) as ArrayRef),
    ])
    .unwrap();

    let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(file.path()).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records[1].metric(Metric::Kilos), 9.0);
    assert_eq!(ds.records[1].metric(Metric::Sales), 0.0);
    assert_eq!(ds.records[0].metric(Metric::NumericDistribution), 0.3);
    assert_eq!(ds.records[1].metric(Metric::NumericDistribution), 0.0);
    assert_eq!(ds.records[1].dimension(Dimension::SalesOffice), None);
}
