//! Marker layer systems: mount, selection changes, camera sync, teardown.

use bevy::app::AppExit;
use bevy::math::DVec2;
use bevy::prelude::*;

use crate::render::{world_position, BevyMapSurface, MapViewport, MineMarker};
use crate::sync::MarkerViewSync;

/// Synchronizer driving the on-screen marker layer.
#[derive(Resource)]
pub struct MineralView(pub MarkerViewSync<Entity>);

/// User picked a mineral in the selector.
#[derive(Event, Clone, Debug, PartialEq)]
pub struct SelectMineral(pub String);

/// Marker for the camera that shows the map.
#[derive(Component)]
pub struct MapCamera;

pub fn setup_scene(mut commands: Commands) {
    commands.spawn((Camera2d, MapCamera, Transform::default()));
}

pub fn mount_map_view(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut viewport: ResMut<MapViewport>,
    mut view: ResMut<MineralView>,
) {
    let mut surface =
        BevyMapSurface::new(&mut commands, &mut meshes, &mut materials, &mut viewport);
    view.0.mount(&mut surface);
}

/// Applies selection events in arrival order. Each one rebuilds the layer.
pub fn apply_selection(
    mut commands: Commands,
    mut events: EventReader<SelectMineral>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut viewport: ResMut<MapViewport>,
    mut view: ResMut<MineralView>,
) {
    for SelectMineral(mineral_id) in events.read() {
        let mut surface =
            BevyMapSurface::new(&mut commands, &mut meshes, &mut materials, &mut viewport);
        view.0.select(mineral_id, &mut surface);
    }
}

/// Destroys the view when the app is shutting down.
pub fn release_map_view(
    mut commands: Commands,
    mut exit: EventReader<AppExit>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut viewport: ResMut<MapViewport>,
    mut view: ResMut<MineralView>,
) {
    if exit.read().next().is_none() {
        return;
    }
    let mut surface =
        BevyMapSurface::new(&mut commands, &mut meshes, &mut materials, &mut viewport);
    view.0.unmount(&mut surface);
}

/// Copies the primary window size into the viewport. Also runs before the
/// first mount so the initial fit sees the real window.
pub fn track_viewport(windows: Query<&Window>, mut viewport: ResMut<MapViewport>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = DVec2::new(window.width() as f64, window.height() as f64);
    if size.x > 0.0 && size.y > 0.0 && viewport.size != size {
        viewport.size = size;
    }
}

pub fn sync_camera(
    viewport: Res<MapViewport>,
    mut cameras: Query<(&mut Transform, &mut OrthographicProjection), With<MapCamera>>,
) {
    if !viewport.is_changed() {
        return;
    }
    let center = world_position(viewport.center);
    for (mut transform, mut projection) in &mut cameras {
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        projection.scale = viewport.scale();
    }
}

/// Keeps markers a constant size on screen.
pub fn scale_markers(
    viewport: Res<MapViewport>,
    mut markers: Query<&mut Transform, With<MineMarker>>,
) {
    let scale = Vec3::splat(viewport.scale());
    for mut transform in &mut markers {
        if transform.scale != scale {
            transform.scale = scale;
        }
    }
}

pub fn marker_plugin(app: &mut App) {
    app.init_resource::<MapViewport>()
        .add_event::<SelectMineral>()
        .add_systems(
            Startup,
            (setup_scene, track_viewport, mount_map_view).chain(),
        )
        .add_systems(
            Update,
            (track_viewport, apply_selection, sync_camera, scale_markers).chain(),
        )
        .add_systems(Last, release_map_view);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog;
    use crate::geo::{self, GeoBounds};
    use crate::sync::{ViewOptions, ViewState};

    fn app() -> App {
        let mut app = App::new();
        app.add_event::<AppExit>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .insert_resource(MineralView(MarkerViewSync::new(
                catalog(),
                ViewOptions::default(),
            )))
            .add_plugins(marker_plugin);
        app
    }

    fn marker_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&MineMarker>().iter(world).count()
    }

    #[test]
    fn startup_spawns_camera_and_default_markers() {
        let mut app = app();
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&MapCamera>().iter(world).count(), 1);
        assert_eq!(marker_count(&mut app), 4);
        assert_eq!(
            app.world().resource::<MineralView>().0.state(),
            ViewState::Ready
        );
    }

    #[test]
    fn first_fit_uses_the_window_size() {
        let mut app = app();
        let mut window = Window::default();
        window.resolution.set(400.0, 300.0);
        app.world_mut().spawn(window);
        app.update();

        let size = DVec2::new(400.0, 300.0);
        let bounds = GeoBounds::from_points(
            catalog().mines_for("aluminum").iter().map(|m| m.position),
        )
        .unwrap();
        let viewport = app.world().resource::<MapViewport>();
        assert_eq!(viewport.size, size);
        assert_eq!(viewport.zoom, geo::bounds_zoom(&bounds, size, 50.0, 18.0));
    }

    #[test]
    fn selection_event_rebuilds_marker_layer() {
        let mut app = app();
        app.update();

        app.world_mut()
            .send_event(SelectMineral("copper".to_string()));
        app.update();
        assert_eq!(marker_count(&mut app), 3);

        app.world_mut()
            .send_event(SelectMineral("unknown-id".to_string()));
        app.update();
        assert_eq!(marker_count(&mut app), 0);
    }

    #[test]
    fn camera_follows_viewport() {
        let mut app = app();
        app.update();
        app.update();

        let viewport_scale = app.world().resource::<MapViewport>().scale();
        let world = app.world_mut();
        let projection = world
            .query_filtered::<&OrthographicProjection, With<MapCamera>>()
            .single(world);
        assert_eq!(projection.scale, viewport_scale);
    }

    #[test]
    fn app_exit_releases_view() {
        let mut app = app();
        app.update();

        app.world_mut().send_event(AppExit::Success);
        app.update();

        assert_eq!(marker_count(&mut app), 0);
        assert_eq!(
            app.world().resource::<MineralView>().0.state(),
            ViewState::Uninitialized
        );
    }
}
