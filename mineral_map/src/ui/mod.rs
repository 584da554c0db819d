mod hud;
mod inspector;
mod selector;

use bevy_egui::egui;

pub use hud::hud_plugin;
pub use inspector::inspector_plugin;
pub use selector::{mines_heading, selector_plugin};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 220, 180);
const TEXT: egui::Color32 = egui::Color32::from_rgb(200, 220, 240);
const MUTED: egui::Color32 = egui::Color32::from_rgb(140, 160, 180);

fn panel_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 220))
        .inner_margin(egui::Margin::same(14))
}

fn apply_panel_style(ui: &mut egui::Ui) {
    ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
    ui.visuals_mut().override_text_color = Some(TEXT);
}
