//! Bevy map capability: markers are 2D entities under a map root, the view
//! is the 2D camera placed in Web-Mercator world space.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::geo::{self, GeoBounds, LatLng};
use crate::render::{MapCapability, PopupContent, TileLayer};

/// On-screen marker radius, independent of zoom.
pub const MARKER_RADIUS_PX: f32 = 7.0;

const DEFAULT_VIEWPORT: DVec2 = DVec2::new(1280.0, 720.0);
const MAX_ZOOM: f64 = 18.0;
const MARKER_COLOR: Color = Color::srgb(0.9, 0.35, 0.2);
const MARKER_Z: f32 = 1.0;

/// Parent of every marker entity. Despawning it tears the view down.
#[derive(Component)]
pub struct MapRoot;

/// A placed mine marker and the payload its popup shows.
#[derive(Component, Clone, Debug)]
pub struct MineMarker {
    pub position: LatLng,
    pub popup: PopupContent,
}

/// Live view state shared between the surface and the camera systems.
#[derive(Resource)]
pub struct MapViewport {
    pub root: Option<Entity>,
    pub center: LatLng,
    pub zoom: f64,
    /// Window size in logical pixels, refreshed every frame.
    pub size: DVec2,
    pub max_zoom: f64,
    pub tile_layer: Option<TileLayer>,
    marker_mesh: Option<Handle<Mesh>>,
    marker_material: Option<Handle<ColorMaterial>>,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            root: None,
            center: LatLng::new(0.0, 0.0),
            zoom: 0.0,
            size: DEFAULT_VIEWPORT,
            max_zoom: MAX_ZOOM,
            tile_layer: None,
            marker_mesh: None,
            marker_material: None,
        }
    }
}

impl MapViewport {
    /// World units per screen pixel at the current zoom.
    pub fn scale(&self) -> f32 {
        2f64.powf(-self.zoom) as f32
    }

    pub fn is_open(&self) -> bool {
        self.root.is_some()
    }
}

/// World-space position of a lat/lng: zoom-0 Mercator pixels with y up.
pub fn world_position(position: LatLng) -> Vec2 {
    let p = geo::project(position, 0.0);
    Vec2::new(p.x as f32, -(p.y as f32))
}

/// Borrowed bundle of everything a system needs to act as a map capability.
pub struct BevyMapSurface<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<ColorMaterial>,
    viewport: &'a mut MapViewport,
}

impl<'a, 'w, 's> BevyMapSurface<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        meshes: &'a mut Assets<Mesh>,
        materials: &'a mut Assets<ColorMaterial>,
        viewport: &'a mut MapViewport,
    ) -> Self {
        Self {
            commands,
            meshes,
            materials,
            viewport,
        }
    }

    fn marker_assets(&mut self) -> (Handle<Mesh>, Handle<ColorMaterial>) {
        let meshes = &mut *self.meshes;
        let materials = &mut *self.materials;
        let mesh = self
            .viewport
            .marker_mesh
            .get_or_insert_with(|| meshes.add(Circle::new(MARKER_RADIUS_PX)))
            .clone();
        let material = self
            .viewport
            .marker_material
            .get_or_insert_with(|| materials.add(MARKER_COLOR))
            .clone();
        (mesh, material)
    }
}

impl MapCapability for BevyMapSurface<'_, '_, '_> {
    type Marker = Entity;

    fn create_view(&mut self, center: LatLng, zoom: f64) {
        if let Some(stale) = self.viewport.root.take() {
            self.commands.entity(stale).despawn_recursive();
        }
        let root = self
            .commands
            .spawn((MapRoot, Transform::default(), Visibility::default()))
            .id();
        self.viewport.root = Some(root);
        self.set_view(center, zoom);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.viewport.tile_layer = Some(layer.clone());
    }

    fn add_marker(&mut self, position: LatLng, popup: PopupContent) -> Entity {
        let (mesh, material) = self.marker_assets();
        let at = world_position(position);
        let marker = self
            .commands
            .spawn((
                MineMarker { position, popup },
                Mesh2d(mesh),
                MeshMaterial2d(material),
                Transform::from_xyz(at.x, at.y, MARKER_Z)
                    .with_scale(Vec3::splat(self.viewport.scale())),
            ))
            .id();
        if let Some(root) = self.viewport.root {
            self.commands.entity(root).add_child(marker);
        }
        marker
    }

    fn remove_marker(&mut self, marker: Entity) {
        self.commands.entity(marker).despawn_recursive();
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.viewport.center = center;
        self.viewport.zoom = zoom.clamp(0.0, self.viewport.max_zoom);
    }

    fn supports_fit_bounds(&self) -> bool {
        true
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds, padding: f64) {
        let fit = geo::fit_bounds(bounds, self.viewport.size, padding, self.viewport.max_zoom);
        self.set_view(fit.center, fit.zoom);
    }

    fn destroy_view(&mut self) {
        if let Some(root) = self.viewport.root.take() {
            self.commands.entity(root).despawn_recursive();
        }
        self.viewport.tile_layer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    use crate::data::catalog;
    use crate::sync::{MarkerViewSync, ViewOptions};

    #[derive(Resource)]
    struct TestView(MarkerViewSync<Entity>);

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .init_resource::<MapViewport>()
            .insert_resource(TestView(MarkerViewSync::new(
                catalog(),
                ViewOptions::default(),
            )));
        app
    }

    fn with_surface(
        app: &mut App,
        f: impl Fn(&mut MarkerViewSync<Entity>, &mut BevyMapSurface) + Send + Sync + 'static,
    ) {
        app.world_mut()
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      mut materials: ResMut<Assets<ColorMaterial>>,
                      mut viewport: ResMut<MapViewport>,
                      mut view: ResMut<TestView>| {
                    let mut surface = BevyMapSurface::new(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        &mut viewport,
                    );
                    f(&mut view.0, &mut surface);
                },
            )
            .unwrap();
    }

    fn marker_names(app: &mut App) -> Vec<&'static str> {
        let world = app.world_mut();
        let mut names: Vec<_> = world
            .query::<&MineMarker>()
            .iter(world)
            .map(|m| m.popup.name)
            .collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn world_position_puts_north_up() {
        let north = world_position(LatLng::new(30.0, 78.0));
        let south = world_position(LatLng::new(10.0, 78.0));
        assert!(north.y > south.y);
    }

    #[test]
    fn mount_spawns_root_and_markers() {
        let mut app = test_app();
        with_surface(&mut app, |sync, surface| sync.mount(surface));

        let world = app.world_mut();
        assert_eq!(world.query::<&MapRoot>().iter(world).count(), 1);
        assert_eq!(marker_names(&mut app).len(), 4);
        let viewport = app.world().resource::<MapViewport>();
        assert!(viewport.is_open());
        assert!(viewport.zoom > 4.0);
    }

    #[test]
    fn reselecting_replaces_markers() {
        let mut app = test_app();
        with_surface(&mut app, |sync, surface| sync.mount(surface));
        with_surface(&mut app, |sync, surface| {
            sync.select("lithium", surface);
        });
        with_surface(&mut app, |sync, surface| {
            sync.select("lithium", surface);
        });

        assert_eq!(
            marker_names(&mut app),
            ["Mandya Lithium Deposit", "Reasi Lithium Deposit"]
        );
    }

    #[test]
    fn unknown_selection_recenters_on_default() {
        let mut app = test_app();
        with_surface(&mut app, |sync, surface| sync.mount(surface));
        with_surface(&mut app, |sync, surface| {
            sync.select("unknown-id", surface);
        });

        assert!(marker_names(&mut app).is_empty());
        let viewport = app.world().resource::<MapViewport>();
        assert_eq!(viewport.center, LatLng::new(20.5937, 78.9629));
        assert_eq!(viewport.zoom, 4.5);
    }

    #[test]
    fn unmount_despawns_everything() {
        let mut app = test_app();
        with_surface(&mut app, |sync, surface| sync.mount(surface));
        with_surface(&mut app, |sync, surface| sync.unmount(surface));

        let world = app.world_mut();
        assert_eq!(world.query::<&MapRoot>().iter(world).count(), 0);
        assert_eq!(world.query::<&MineMarker>().iter(world).count(), 0);
        assert!(!app.world().resource::<MapViewport>().is_open());
    }
}
