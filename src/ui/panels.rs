use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::{present, save_export, EXPORT_FILE_NAME};
use crate::data::model::{Dimension, Metric};
use crate::data::rank::MAX_WEIGHT;
use crate::state::AppState;

/// Label shown for blank categorical cells.
const BLANK_LABEL: &str = "(blank)";

// ---------------------------------------------------------------------------
// Left side panel – filter and weight widgets
// ---------------------------------------------------------------------------

/// Render the left panel: filters, colour selector and weight sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.heading("Filters");
            ui.separator();
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let unique = dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Filters");
            ui.separator();

            // ---- Per-dimension filter widgets (collapsible) ----
            for dim in Dimension::ALL {
                let Some(all_values) = unique.get(&dim) else {
                    continue;
                };

                let n_selected = state.selection.values(dim).map_or(0, |s| s.len());
                let header_text = format!("{}  ({n_selected}/{})", dim.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for val in all_values {
                            let label = val.as_deref().unwrap_or(BLANK_LABEL);
                            let mut text = RichText::new(label);
                            if state.color_dimension == dim {
                                if let Some(cm) = &state.color_map {
                                    text = text.color(cm.color_for(val.as_deref()));
                                }
                            }

                            let mut checked = state.selection.contains(dim, val.as_deref());
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(dim, val);
                            }
                        }
                    });
            }
            ui.add_space(4.0);

            // ---- Colour-by selector ----
            ui.strong("Color by");
            let current = state.color_dimension;
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for dim in Dimension::ALL {
                        if ui.selectable_label(current == dim, dim.label()).clicked() {
                            state.set_color_dimension(dim);
                        }
                    }
                });

            ui.add_space(8.0);
            ui.heading("Model weights (%)");
            ui.separator();
            weight_sliders(ui, state);
        });
}

fn weight_sliders(ui: &mut Ui, state: &mut AppState) {
    for metric in Metric::ALL {
        let mut value = state.weights.get(metric);
        let slider = egui::Slider::new(&mut value, 0..=MAX_WEIGHT)
            .text(metric.label())
            .suffix("%");
        if ui.add(slider).changed() {
            state.set_weight(metric, value);
        }
    }

    ui.add_space(4.0);
    ui.label(RichText::new(format!("Weight total: {}%", state.weights.total())).strong());
    if let Some(warning) = state.weights.warning() {
        ui.label(RichText::new(format!("⚠ {warning}")).color(Color32::from_rgb(230, 160, 0)));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
            let can_export = state.ranking.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export to Excel…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(user) = &state.session.user {
            ui.label(format!("Signed in as {user}"));
            ui.separator();
        }

        if let (Some(ds), Some(ranking)) = (&state.dataset, &state.ranking) {
            ui.label(format!("{} rows loaded, {} ranked", ds.len(), ranking.len()));
        }

        if let Some(err) = &state.load_error {
            ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
        }
        if let Some(msg) = &state.status_message {
            ui.label(msg);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Log out").clicked() {
                state.logout();
            }
        });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let Some(ranking) = &state.ranking else {
        return;
    };

    let bytes = match present(ranking) {
        Ok((_, bytes)) => bytes,
        Err(e) => {
            log::error!("Failed to build export: {e}");
            state.status_message = Some(format!("Export failed: {e}"));
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Export ranking")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("Excel workbook", &["xlsx"])
        .save_file();

    if let Some(path) = file {
        state.status_message = Some(match save_export(&path, &bytes) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("Failed to save export: {e}");
                format!("Export failed: {e}")
            }
        });
    }
}
