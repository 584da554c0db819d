//! In-memory map capability. Keeps the live view state and a log of every
//! command it received; serializable for the headless JSON export.

use bevy::math::DVec2;
use serde::Serialize;

use crate::geo::{self, GeoBounds, LatLng};
use crate::render::{MapCapability, PopupContent, TileLayer};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    CreateView { center: LatLng, zoom: f64 },
    AddTileLayer { template: String },
    AddMarker { id: usize, position: LatLng },
    RemoveMarker { id: usize },
    SetView { center: LatLng, zoom: f64 },
    FitBounds { bounds: GeoBounds, padding: f64 },
    DestroyView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordedMarker {
    pub id: usize,
    pub position: LatLng,
    pub popup: PopupContent,
}

/// Default viewport the recording map resolves fits against.
pub const RECORDING_VIEWPORT: DVec2 = DVec2::new(1280.0, 720.0);
const MAX_ZOOM: f64 = 18.0;

/// Where the view currently points. After a fit, `center` and `zoom` are the
/// resolved fit and `fitted` keeps the requested bounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub center: LatLng,
    pub zoom: f64,
    pub fitted: Option<GeoBounds>,
}

#[derive(Debug, Serialize)]
pub struct RecordingMap {
    fit_supported: bool,
    #[serde(skip)]
    viewport: DVec2,
    next_id: usize,
    views_created: usize,
    view: Option<ViewSnapshot>,
    tile_layer: Option<TileLayer>,
    markers: Vec<RecordedMarker>,
    commands: Vec<MapCommand>,
}

impl Default for RecordingMap {
    fn default() -> Self {
        Self {
            fit_supported: false,
            viewport: RECORDING_VIEWPORT,
            next_id: 0,
            views_created: 0,
            view: None,
            tile_layer: None,
            markers: Vec::new(),
            commands: Vec::new(),
        }
    }
}

impl RecordingMap {
    pub fn new(fit_supported: bool) -> Self {
        Self {
            fit_supported,
            ..Self::default()
        }
    }

    /// Viewport size in pixels used to resolve fits into a center and zoom.
    pub fn with_viewport(mut self, size: DVec2) -> Self {
        self.viewport = size;
        self
    }

    /// Live markers in insertion order.
    pub fn markers(&self) -> &[RecordedMarker] {
        &self.markers
    }

    pub fn view(&self) -> Option<&ViewSnapshot> {
        self.view.as_ref()
    }

    pub fn tile_layer(&self) -> Option<&TileLayer> {
        self.tile_layer.as_ref()
    }

    pub fn commands(&self) -> &[MapCommand] {
        &self.commands
    }

    pub fn views_created(&self) -> usize {
        self.views_created
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl MapCapability for RecordingMap {
    type Marker = usize;

    fn create_view(&mut self, center: LatLng, zoom: f64) {
        self.views_created += 1;
        self.view = Some(ViewSnapshot {
            center,
            zoom,
            fitted: None,
        });
        self.commands.push(MapCommand::CreateView { center, zoom });
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tile_layer = Some(layer.clone());
        self.commands.push(MapCommand::AddTileLayer {
            template: layer.template.clone(),
        });
    }

    fn add_marker(&mut self, position: LatLng, popup: PopupContent) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.markers.push(RecordedMarker {
            id,
            position,
            popup,
        });
        self.commands.push(MapCommand::AddMarker { id, position });
        id
    }

    fn remove_marker(&mut self, id: usize) {
        self.markers.retain(|m| m.id != id);
        self.commands.push(MapCommand::RemoveMarker { id });
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.view = Some(ViewSnapshot {
            center,
            zoom,
            fitted: None,
        });
        self.commands.push(MapCommand::SetView { center, zoom });
    }

    fn supports_fit_bounds(&self) -> bool {
        self.fit_supported
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds, padding: f64) {
        let fit = geo::fit_bounds(bounds, self.viewport, padding, MAX_ZOOM);
        self.view = Some(ViewSnapshot {
            center: fit.center,
            zoom: fit.zoom,
            fitted: Some(*bounds),
        });
        self.commands.push(MapCommand::FitBounds {
            bounds: *bounds,
            padding,
        });
    }

    fn destroy_view(&mut self) {
        self.view = None;
        self.tile_layer = None;
        self.markers.clear();
        self.commands.push(MapCommand::DestroyView);
    }
}
