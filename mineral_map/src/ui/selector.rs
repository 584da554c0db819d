//! Left panel: mineral selector and the list of mines for the selection.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::data::Mineral;
use crate::scene::{MineralView, SelectMineral, SelectedMarker};
use crate::ui::{apply_panel_style, panel_frame, ACCENT, MUTED};

const LIST_MAX_HEIGHT: f32 = 400.0;

pub fn selector_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_systems(Update, selector_panel_system);
}

/// Heading above the mine list. Unknown selections have no display name.
pub fn mines_heading(mineral: Option<&Mineral>) -> String {
    match mineral {
        Some(mineral) => format!("{} Mines", mineral.name),
        None => "Mines".to_string(),
    }
}

fn selector_panel_system(
    mut contexts: EguiContexts,
    view: Res<MineralView>,
    mut selected_marker: ResMut<SelectedMarker>,
    mut writer: EventWriter<SelectMineral>,
) {
    let sync = &view.0;
    let mut choice = sync.selected().to_string();
    let current = sync.selected_mineral();

    egui::SidePanel::left("selector")
        .default_width(300.0)
        .resizable(false)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);

            ui.label(
                egui::RichText::new("Explore Mineral Resources in India")
                    .size(18.0)
                    .color(ACCENT),
            );
            ui.label(
                egui::RichText::new(
                    "Discover major mining locations across India and their mineral production data",
                )
                .size(11.0)
                .color(MUTED),
            );
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Select a Mineral").size(14.0));
            let selected_text = current.map_or_else(|| "Select a mineral".to_string(), Mineral::label);
            egui::ComboBox::from_id_salt("mineral")
                .selected_text(selected_text)
                .width(260.0)
                .show_ui(ui, |ui| {
                    for mineral in sync.catalog().minerals() {
                        ui.selectable_value(&mut choice, mineral.id.to_string(), mineral.label());
                    }
                });
            ui.add_space(12.0);
            ui.separator();

            ui.label(egui::RichText::new(mines_heading(current)).size(14.0));
            ui.add_space(4.0);

            if sync.visible().is_empty() {
                ui.label(
                    egui::RichText::new("No mine data available for this mineral.").color(MUTED),
                );
                return;
            }

            egui::ScrollArea::vertical()
                .max_height(LIST_MAX_HEIGHT)
                .show(ui, |ui| {
                    for (i, mine) in sync.visible().iter().enumerate() {
                        let marker = sync.rendered().get(i).copied();
                        let is_open = marker.is_some() && marker == selected_marker.0;
                        let name = egui::RichText::new(mine.name).color(if is_open {
                            ACCENT
                        } else {
                            egui::Color32::WHITE
                        });
                        if ui.add(egui::Label::new(name).sense(egui::Sense::click())).clicked() {
                            selected_marker.0 = marker;
                        }
                        ui.label(egui::RichText::new(mine.region).size(11.0).color(MUTED));
                        ui.label(format!("Production: {}", mine.production));
                        ui.add_space(6.0);
                    }
                });
        });

    if choice != sync.selected() {
        writer.send(SelectMineral(choice));
    }
}
