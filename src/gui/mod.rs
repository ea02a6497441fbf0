use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use preop::config::{self, AppSettings};
use preop::session::{EvaluationReply, Session};
use preop::worker;

pub mod form;
pub mod history;
pub mod settings;

const APP_TITLE: &str = "Pre-Anesthesia Testing Tool";

/// Launches the desktop window. Blocks until it is closed.
pub fn run() -> anyhow::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([760.0, 900.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(|cc| Ok(Box::new(PreopApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start GUI: {e}"))
}

pub struct PreopApp {
    pub session: Session,
    pub settings: AppSettings,
    pub status: String,

    /// Evaluations sent but not yet drained.
    pub pending: usize,
    reply_tx: Sender<EvaluationReply>,
    reply_rx: Receiver<EvaluationReply>,

    // Settings panel
    pub export_dir_input: String,
}

impl PreopApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        crate::theme::apply_preop_theme(&cc.egui_ctx);
        Self::with_settings(config::load_app_settings())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let (reply_tx, reply_rx) = crossbeam_channel::unbounded();
        let export_dir_input = settings
            .export_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();

        Self {
            session: Session::new(),
            settings,
            status: String::new(),
            pending: 0,
            reply_tx,
            reply_rx,
            export_dir_input,
        }
    }

    /// Sends the current form in the background. Overlapping submissions are
    /// allowed; whichever reply is drained last is displayed.
    pub fn start_evaluation(&mut self, ctx: egui::Context) {
        self.session.input.normalize();
        self.pending += 1;
        self.status = format!("Evaluating via {} ...", self.settings.endpoint);
        tracing::info!(pending = self.pending, "Evaluation requested");

        worker::spawn_evaluation(
            self.settings.clone(),
            self.session.request_payload(),
            self.reply_tx.clone(),
            move || ctx.request_repaint(),
        );
    }

    pub fn download_summary(&mut self) {
        self.session.input.normalize();
        self.apply_export_dir_input();
        let dir = self.settings.resolved_export_dir();
        match self.session.export_summary(&dir) {
            Ok(path) => {
                self.status = format!("Summary saved to {}", path.display());
            }
            Err(e) => {
                tracing::error!("Summary export failed: {e}");
                self.status = format!("Failed to save summary: {e}");
            }
        }
    }

    pub fn handle_receivers(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            self.status = if reply.outcome.is_success() {
                "Evaluation complete.".to_owned()
            } else {
                "Evaluation failed.".to_owned()
            };
            self.session.apply_reply(reply);
        }
    }

    fn render_header(ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(crate::theme::top_bar_frame())
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(
                        egui::RichText::new(APP_TITLE)
                            .size(24.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                });
            });
    }

    fn render_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                render_status_message(ui, &self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .small()
                            .weak(),
                    );
                });
            });
        });
    }
}

impl eframe::App for PreopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_receivers();

        Self::render_header(ctx);
        self.render_footer(ctx);

        egui::CentralPanel::default()
            .frame(crate::theme::central_panel_frame(ctx))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(crate::theme::CONTENT_MAX_WIDTH);
                        ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                            self.render_assessment_form(ui, ctx);
                            ui.add_space(crate::theme::SPACING_LARGE);
                            self.render_recommendations(ui);
                            ui.add_space(crate::theme::SPACING_LARGE);
                            self.render_history(ui);
                            ui.add_space(crate::theme::SPACING_LARGE);
                            self.render_settings(ui);
                        });
                    });
                });
            });

        if self.pending > 0 {
            ctx.request_repaint();
        }
    }
}

pub fn render_status_message(ui: &mut egui::Ui, status: &str) {
    if status.is_empty() {
        return;
    }
    let color = if status.starts_with("Failed") || status.contains("failed") {
        ui.visuals().error_fg_color
    } else {
        ui.visuals().weak_text_color()
    };
    ui.label(egui::RichText::new(status).color(color));
}
