use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{login, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PortfolioApp {
    pub state: AppState,
}

impl PortfolioApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.state.session.authenticated {
            egui::CentralPanel::default().show(ctx, |ui| {
                login::login_form(ui, &mut self.state);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and weights ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: top-N chart ----
        egui::TopBottomPanel::bottom("score_chart")
            .resizable(true)
            .default_height(220.0)
            .show(ctx, |ui| {
                plot::score_chart(ui, &self.state);
            });

        // ---- Central panel: ranking table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::ranking_table(ui, &self.state);
        });
    }
}
