//! Bottom-right overlay: marker count, zoom and tile attribution.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::render::MapViewport;
use crate::scene::MineralView;
use crate::ui::{MUTED, TEXT};

pub fn hud_plugin(app: &mut App) {
    app.add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    view: Res<MineralView>,
    viewport: Res<MapViewport>,
) {
    if !viewport.is_open() {
        return;
    }

    egui::Area::new(egui::Id::new("map_hud"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 190))
                .inner_margin(egui::Margin::same(8))
                .corner_radius(egui::CornerRadius::same(4))
                .show(ui, |ui| {
                    ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
                    ui.label(
                        egui::RichText::new(format!(
                            "Markers {}  Zoom {:.1}",
                            view.0.rendered_count(),
                            viewport.zoom
                        ))
                        .color(TEXT),
                    );
                    if let Some(layer) = &viewport.tile_layer {
                        ui.label(
                            egui::RichText::new(&layer.attribution)
                                .size(10.0)
                                .color(MUTED),
                        );
                    }
                });
        });
}
