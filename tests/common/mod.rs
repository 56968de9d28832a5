#![allow(dead_code)]

use portfolio_ranker::data::loader::build_dataset;
use portfolio_ranker::data::model::{Cell, Dataset};
use rust_xlsxwriter::Workbook;

pub const HEADERS: [&str; 9] = [
    "Nombre Canal",
    "Nombre G Cliente",
    "Categoria",
    "Nombre Oficina Ventas",
    "Material",
    "Kilos",
    "Venta",
    "DN",
    "CAF",
];

/// One source row: (channel, client, category, office, kilos, venta, dn, caf).
pub type Row<'a> = (&'a str, &'a str, &'a str, Option<&'a str>, f64, f64, f64, f64);

pub fn cells(i: usize, row: &Row) -> Vec<Cell> {
    let (channel, client, category, office, kilos, venta, dn, caf) = *row;
    vec![
        Cell::String(channel.into()),
        Cell::String(client.into()),
        Cell::String(category.into()),
        office.map_or(Cell::Null, |o| Cell::String(o.into())),
        Cell::String(format!("SKU-{i}")),
        Cell::Float(kilos),
        Cell::Float(venta),
        Cell::Float(dn),
        Cell::Float(caf),
    ]
}

pub fn dataset(rows: &[Row]) -> Dataset {
    let headers = HEADERS.iter().map(|h| h.to_string()).collect();
    let body = rows.iter().enumerate().map(|(i, r)| cells(i, r)).collect();
    build_dataset(headers, body).unwrap()
}

/// Same rows serialized as an xlsx workbook.
pub fn xlsx_bytes(rows: &[Row]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (c, h) in HEADERS.iter().enumerate() {
        sheet.write_string(0, c as u16, *h).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (c, cell) in cells(i, row).iter().enumerate() {
            match cell {
                Cell::String(s) => {
                    sheet.write_string(r, c as u16, s).unwrap();
                }
                Cell::Float(v) => {
                    sheet.write_number(r, c as u16, *v).unwrap();
                }
                _ => {}
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

pub fn sample_rows() -> Vec<Row<'static>> {
    vec![
        ("Moderno", "Exito", "Cocoa", Some("Bogota"), 100.0, 5_000.0, 0.4, 10.0),
        ("Moderno", "Exito", "Confites", Some("Cali"), 300.0, 1_000.0, 0.9, 12.0),
        ("Tradicional", "D1", "Cocoa", Some("Bogota"), 200.0, 8_000.0, 0.2, 8.0),
        ("Tradicional", "D1", "Granulados", None, 50.0, 2_000.0, 0.6, 9.0),
        ("Institucional", "Olimpica", "Confites", Some("Medellin"), 250.0, 3_000.0, 0.7, 11.0),
    ]
}
