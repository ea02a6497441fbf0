use crate::gui::PreopApp;
use crate::theme::{SPACING_MEDIUM, SPACING_SMALL};
use eframe::egui;

impl PreopApp {
    pub fn render_assessment_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        crate::theme::card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Assessment");
            ui.add_space(SPACING_SMALL);

            egui::Grid::new("assessment_grid")
                .num_columns(2)
                .spacing([24.0, SPACING_MEDIUM])
                .striped(true)
                .show(ui, |ui| {
                    let input = &mut self.session.input;

                    ui.label("Age:");
                    ui.add(egui::DragValue::new(&mut input.age).speed(1.0).suffix(" y"));
                    ui.end_row();

                    ui.label("Comorbidities:");
                    ui.add(
                        egui::TextEdit::multiline(&mut input.comorbidities)
                            .hint_text("Comma separated: diabetes, CAD, COPD, etc.")
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    );
                    ui.end_row();

                    ui.label("Functional Status:");
                    ui.add(
                        egui::TextEdit::singleline(&mut input.functional_status)
                            .hint_text("e.g., METs <4, ADLs")
                            .desired_width(f32::INFINITY),
                    );
                    ui.end_row();

                    ui.label("ASA Class:");
                    ui.add(
                        egui::TextEdit::singleline(&mut input.asa_class)
                            .hint_text("ASA classification (1-4)")
                            .desired_width(f32::INFINITY),
                    );
                    ui.end_row();

                    ui.label("Procedure Type:");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut input.procedure_type)
                            .hint_text("e.g., vascular, ortho, endoscopy")
                            .desired_width(f32::INFINITY),
                    );
                    // Lower-cased once editing ends so the cursor never jumps.
                    if response.lost_focus() {
                        input.normalize();
                    }
                    ui.end_row();
                });

            ui.add_space(SPACING_MEDIUM);

            ui.horizontal(|ui| {
                if ui
                    .button("Evaluate")
                    .on_hover_text(format!("Send to {}", self.settings.endpoint))
                    .clicked()
                {
                    self.start_evaluation(ctx.clone());
                }
                if ui.button("Download Summary").clicked() {
                    self.download_summary();
                }
                if self.pending > 0 {
                    ui.add(egui::Spinner::new());
                    ui.label(format!("{} pending", self.pending));
                }
            });
        });
    }

    pub fn render_recommendations(&self, ui: &mut egui::Ui) {
        crate::theme::card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Recommendations");
            ui.add_space(SPACING_SMALL);

            let recommendations = self.session.recommendations();
            if recommendations.is_empty() {
                ui.label(egui::RichText::new("No recommendations yet.").weak());
                return;
            }

            for rec in recommendations {
                if rec.starts_with("Error:") {
                    ui.colored_label(ui.visuals().error_fg_color, format!("• {rec}"));
                } else {
                    ui.label(format!("• {rec}"));
                }
            }
        });
    }
}
