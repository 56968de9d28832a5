use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::score_color;
use crate::data::export::{RANK_COLUMN, SCORE_COLUMN};
use crate::data::model::Cell;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Ranking table (central panel)
// ---------------------------------------------------------------------------

/// Render the ranked records, best first.
pub fn ranking_table(ui: &mut Ui, state: &AppState) {
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("Could not load data: {err}"));
        });
        return;
    }

    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded  (File → Reload data)");
        });
        return;
    };

    ui.heading("Portfolio ranking");
    if table.is_empty() {
        ui.label("No rows match the current filters.");
    }

    let score_idx = table.columns.iter().position(|c| c == SCORE_COLUMN);
    let rank_idx = table.columns.iter().position(|c| c == RANK_COLUMN);
    let color_idx = table
        .columns
        .iter()
        .position(|c| c == state.color_dimension.column());
    let max_score = table
        .rows
        .iter()
        .filter_map(|row| score_idx.and_then(|i| row.get(i)))
        .map(Cell::coerce_f64)
        .fold(0.0, f64::max);

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), table.columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for (i, cell) in cells.iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            let mut text = RichText::new(cell.to_string());
                            if Some(i) == score_idx {
                                let score = cell.coerce_f64();
                                text = RichText::new(format!("{score:.4}"))
                                    .color(score_color(score, max_score));
                            } else if Some(i) == rank_idx {
                                text = text.strong();
                            } else if Some(i) == color_idx {
                                if let Some(cm) = &state.color_map {
                                    text = text.color(cm.color_for(cell.as_category().as_deref()));
                                }
                            }
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
