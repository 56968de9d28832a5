use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const HEADERS: [&str; 10] = [
    "Nombre Canal",
    "Nombre G Cliente",
    "Categoria",
    "Nombre Oficina Ventas",
    "Material",
    "Descripcion",
    "Kilos",
    "Venta",
    "DN",
    "CAF",
];

fn main() -> Result<(), XlsxError> {
    let mut rng = SimpleRng::new(42);

    let channels = ["Moderno", "Tradicional", "Institucional"];
    let clients = ["Grupo Exito", "Cencosud", "Olimpica", "Tiendas D1", "Mayoristas"];
    let categories = ["Chocolate de mesa", "Cocoa", "Confites", "Granulados"];
    let offices = ["Bogota", "Medellin", "Cali", "Barranquilla"];

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }

    let n_rows: u32 = 120;
    for row in 1..=n_rows {
        let category = rng.pick(&categories);
        sheet.write_string(row, 0, rng.pick(&channels))?;
        sheet.write_string(row, 1, rng.pick(&clients))?;
        sheet.write_string(row, 2, category)?;
        // Every 15th row has no sales office.
        if row % 15 != 0 {
            sheet.write_string(row, 3, rng.pick(&offices))?;
        }
        sheet.write_string(row, 4, format!("SKU-{:04}", 1000 + row))?;
        sheet.write_string(row, 5, format!("{category} ref {row}"))?;

        // Every 20th row carries a non-numeric kilos value.
        if row % 20 == 0 {
            sheet.write_string(row, 6, "n/d")?;
        } else {
            sheet.write_number(row, 6, (rng.next_f64() * 5_000.0).round())?;
        }
        sheet.write_number(row, 7, (rng.next_f64() * 80_000_000.0).round())?;
        sheet.write_number(row, 8, (rng.next_f64() * 100.0).round() / 100.0)?;
        sheet.write_number(row, 9, (rng.next_f64() * 40.0).round())?;
    }

    let output_path = "PortafolioFoco.xlsx";
    workbook.save(output_path)?;

    println!("Wrote {n_rows} portfolio rows to {output_path}");
    Ok(())
}
