//! Marker popup: shows name, region and production rate of the clicked mine.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::render::{MineMarker, PopupContent};
use crate::scene::SelectedMarker;
use crate::ui::{apply_panel_style, panel_frame, ACCENT, MUTED};

pub fn inspector_plugin(app: &mut App) {
    app.add_systems(Update, inspector_panel_system);
}

fn inspector_panel_system(
    mut contexts: EguiContexts,
    selected: Res<SelectedMarker>,
    markers: Query<&MineMarker>,
) {
    let Some(entity) = selected.0 else {
        return;
    };
    // Gone after a selection change rebuilt the layer.
    let Ok(marker) = markers.get(entity) else {
        return;
    };
    show_popup_panel(&mut contexts, &marker.popup);
}

fn show_popup_panel(contexts: &mut EguiContexts, popup: &PopupContent) {
    egui::SidePanel::right("popup")
        .default_width(260.0)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);

            ui.label(egui::RichText::new(popup.name).size(18.0).color(ACCENT));
            ui.add_space(8.0);

            ui.label(popup.region_line());
            ui.label(popup.production_line());
            ui.add_space(12.0);

            ui.label(
                egui::RichText::new("Esc to dismiss")
                    .size(11.0)
                    .color(MUTED),
            );
        });
}
