use eframe::egui;
use egui::{Color32, CornerRadius, Margin, Stroke};

pub const ACCENT_COLOR: Color32 = Color32::from_rgb(33, 118, 174);

// Spacing constants
pub const SPACING_TINY: f32 = 4.0;
pub const SPACING_SMALL: f32 = 8.0;
pub const SPACING_MEDIUM: f32 = 12.0;
pub const SPACING_LARGE: f32 = 20.0;

// Margin/Padding constants
pub const MARGIN_CARD: i8 = 15;
pub const PANEL_SIDE: i8 = 20;
pub const PANEL_VERTICAL: i8 = 10;

/// Widest the form column grows; keeps lines readable on large windows.
pub const CONTENT_MAX_WIDTH: f32 = 760.0;

pub fn apply_preop_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();

    visuals.widgets.active.bg_fill = ACCENT_COLOR;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(214, 230, 242);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(6);

    visuals.widgets.inactive.corner_radius = CornerRadius::same(6);
    visuals.widgets.noninteractive.corner_radius = CornerRadius::same(6);

    visuals.selection.bg_fill = ACCENT_COLOR.linear_multiply(0.4);

    visuals.window_corner_radius = CornerRadius::same(12);
    visuals.faint_bg_color = Color32::from_rgb(246, 248, 250);

    ctx.set_visuals(visuals);
}

pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(MARGIN_CARD))
        .stroke(Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
}

pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(ACCENT_COLOR)
        .inner_margin(Margin {
            left: PANEL_SIDE,
            right: PANEL_SIDE,
            top: PANEL_VERTICAL,
            bottom: PANEL_VERTICAL,
        })
}

pub fn central_panel_frame(ctx: &egui::Context) -> egui::Frame {
    egui::Frame::central_panel(&ctx.style()).inner_margin(Margin {
        left: PANEL_SIDE,
        right: PANEL_SIDE,
        top: PANEL_VERTICAL,
        bottom: PANEL_VERTICAL,
    })
}
