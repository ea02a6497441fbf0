use crate::gui::PreopApp;
use crate::theme::{SPACING_SMALL, SPACING_TINY};
use eframe::egui;
use preop::assessment::AssessmentInput;

impl PreopApp {
    pub fn render_history(&self, ui: &mut egui::Ui) {
        crate::theme::card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Decision History");
            ui.add_space(SPACING_SMALL);

            let history = self.session.history();
            if history.is_empty() {
                ui.label(egui::RichText::new("No evaluations this session.").weak());
                return;
            }

            for (idx, entry) in history.iter().enumerate() {
                ui.label(egui::RichText::new(&entry.timestamp).strong());
                ui.indent(("history_entry", idx), |ui| {
                    ui.label(egui::RichText::new(describe_input(&entry.input)).small().weak());
                    for rec in &entry.recommendations {
                        ui.label(format!("• {rec}"));
                    }
                });
                ui.add_space(SPACING_TINY);
            }
        });
    }
}

/// One-line recap of what was sent, e.g. `Age 45 · ASA 2 · vascular`.
fn describe_input(input: &AssessmentInput) -> String {
    let mut parts = vec![format!("Age {}", input.age)];
    if !input.asa_class.is_empty() {
        parts.push(format!("ASA {}", input.asa_class));
    }
    if !input.procedure_type.is_empty() {
        parts.push(input.procedure_type.clone());
    }
    parts.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_input_skips_blank_fields() {
        let input = AssessmentInput {
            age: 45,
            ..Default::default()
        };
        assert_eq!(describe_input(&input), "Age 45");

        let input = AssessmentInput {
            age: 45,
            asa_class: "2".to_owned(),
            procedure_type: "vascular".to_owned(),
            ..Default::default()
        };
        assert_eq!(describe_input(&input), "Age 45 · ASA 2 · vascular");
    }
}
