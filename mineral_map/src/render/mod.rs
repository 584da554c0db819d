//! Mapping capability trait, shared payload types and implementations.

mod bevy_map;
mod recording;
mod tiles;

use serde::Serialize;

use crate::data::MineLocation;
use crate::geo::{GeoBounds, LatLng};

pub use bevy_map::{
    world_position, BevyMapSurface, MapRoot, MapViewport, MineMarker, MARKER_RADIUS_PX,
};
pub use recording::{
    MapCommand, RecordedMarker, RecordingMap, ViewSnapshot, RECORDING_VIEWPORT,
};
pub use tiles::TileLayer;

/// Label payload attached to a marker, shown on demand.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PopupContent {
    pub mine_id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub production: &'static str,
}

impl PopupContent {
    pub fn for_mine(mine: &MineLocation) -> Self {
        Self {
            mine_id: mine.id,
            name: mine.name,
            region: mine.region,
            production: mine.production,
        }
    }

    pub fn region_line(&self) -> String {
        format!("{}, India", self.region)
    }

    pub fn production_line(&self) -> String {
        format!("Production: {}", self.production)
    }
}

/// Everything the synchronizer needs from a map engine.
///
/// Implementations own the actual view. The synchronizer only issues
/// commands and keeps the marker handles it was given back.
pub trait MapCapability {
    type Marker;

    fn create_view(&mut self, center: LatLng, zoom: f64);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn add_marker(&mut self, position: LatLng, popup: PopupContent) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Whether [`MapCapability::fit_bounds`] is implemented.
    fn supports_fit_bounds(&self) -> bool {
        false
    }

    /// Frame `bounds` with `padding` pixels of margin on every side.
    fn fit_bounds(&mut self, _bounds: &GeoBounds, _padding: f64) {}

    fn destroy_view(&mut self);
}
