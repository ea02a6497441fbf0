use crate::gui::PreopApp;
use crate::theme::{SPACING_MEDIUM, SPACING_SMALL};
use eframe::egui;
use preop::config;
use std::path::PathBuf;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl PreopApp {
    pub fn render_settings(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Connection Settings")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([24.0, SPACING_MEDIUM])
                    .show(ui, |ui| {
                        ui.label("Endpoint:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.settings.endpoint)
                                .desired_width(f32::INFINITY),
                        );
                        ui.end_row();

                        ui.label("Timeout:");
                        ui.horizontal(|ui| {
                            let mut use_timeout = self.settings.request_timeout_secs.is_some();
                            if ui.checkbox(&mut use_timeout, "Limit").changed() {
                                self.settings.request_timeout_secs =
                                    use_timeout.then_some(DEFAULT_TIMEOUT_SECS);
                            }
                            if let Some(secs) = &mut self.settings.request_timeout_secs {
                                ui.add(egui::DragValue::new(secs).range(1..=600).suffix(" s"));
                            } else {
                                ui.label(egui::RichText::new("none").weak());
                            }
                        });
                        ui.end_row();

                        ui.label("Export Folder:");
                        let hint = self.settings.resolved_export_dir().display().to_string();
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.export_dir_input)
                                .hint_text(hint)
                                .desired_width(f32::INFINITY),
                        );
                        if response.changed() {
                            self.apply_export_dir_input();
                        }
                        ui.end_row();
                    });

                ui.add_space(SPACING_SMALL);
                if ui.button("Save Settings").clicked() {
                    self.save_settings();
                }
            });
    }

    /// Like endpoint and timeout, the export folder takes effect as typed;
    /// saving only persists it.
    pub fn apply_export_dir_input(&mut self) {
        let trimmed = self.export_dir_input.trim();
        self.settings.export_dir = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
    }

    pub fn save_settings(&mut self) {
        self.apply_export_dir_input();

        match config::save_app_settings(&self.settings) {
            Ok(()) => {
                self.status = "Settings saved.".to_owned();
                tracing::info!(endpoint = %self.settings.endpoint, "Settings saved");
            }
            Err(e) => {
                tracing::error!("Failed to save settings: {e}");
                self.status = format!("Failed to save settings: {e}");
            }
        }
    }
}
