use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

/// Render the username/password form shown until a session exists.
pub fn login_form(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading("Portfolio Simulator – Sign in");
        ui.add_space(12.0);

        ui.label("Username");
        ui.add(egui::TextEdit::singleline(&mut state.login_user).desired_width(220.0));
        ui.label("Password");
        let pw = ui.add(
            egui::TextEdit::singleline(&mut state.login_password)
                .password(true)
                .desired_width(220.0),
        );
        ui.add_space(8.0);

        let submitted = pw.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Sign in").clicked() || submitted {
            state.submit_login();
        }

        if let Some(err) = &state.login_error {
            ui.add_space(8.0);
            ui.label(RichText::new(err).color(Color32::RED));
        }
    });
}
