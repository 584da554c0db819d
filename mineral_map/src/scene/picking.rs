//! Click a marker to open its popup. Hit-testing is a plain distance check
//! in world space so egui keeps the pointer when it is over a panel.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::render::{MapViewport, MineMarker, MARKER_RADIUS_PX};
use crate::scene::markers::{apply_selection, MapCamera, SelectMineral};

/// Extra screen pixels around a marker that still count as a hit.
const HIT_SLOP_PX: f32 = 4.0;

/// Marker whose popup is open, if any.
#[derive(Resource, Default)]
pub struct SelectedMarker(pub Option<Entity>);

pub fn picking_plugin(app: &mut App) {
    app.init_resource::<SelectedMarker>().add_systems(
        Update,
        (
            click_marker_system,
            dismiss_popup_system,
            close_popup_on_selection.before(apply_selection),
        ),
    );
}

fn click_marker_system(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut contexts: EguiContexts,
    markers: Query<(Entity, &GlobalTransform), With<MineMarker>>,
    viewport: Res<MapViewport>,
    mut selected: ResMut<SelectedMarker>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if contexts.ctx_mut().is_pointer_over_area() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(cursor_world) = camera.viewport_to_world_2d(cam_transform, cursor_pos) else {
        return;
    };

    let radius = (MARKER_RADIUS_PX + HIT_SLOP_PX) * viewport.scale();
    let hit = nearest_marker(
        cursor_world,
        markers.iter().map(|(e, t)| (e, t.translation().truncate())),
        radius,
    );
    // Clicking empty map closes the popup.
    selected.0 = hit;
}

fn dismiss_popup_system(keys: Res<ButtonInput<KeyCode>>, mut selected: ResMut<SelectedMarker>) {
    if keys.just_pressed(KeyCode::Escape) {
        selected.0 = None;
    }
}

/// Markers are rebuilt on every selection, so an open popup would point at a
/// despawned entity.
fn close_popup_on_selection(
    mut events: EventReader<SelectMineral>,
    mut selected: ResMut<SelectedMarker>,
) {
    if events.read().count() > 0 {
        selected.0 = None;
    }
}

/// Closest marker within `radius` of `point`.
pub fn nearest_marker(
    point: Vec2,
    markers: impl IntoIterator<Item = (Entity, Vec2)>,
    radius: f32,
) -> Option<Entity> {
    markers
        .into_iter()
        .map(|(entity, at)| (entity, at.distance(point)))
        .filter(|&(_, dist)| dist <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}
