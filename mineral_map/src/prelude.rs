//! Minimal prelude for SDK consumers.

pub use crate::config::view_options;
pub use crate::data::{catalog, MineLocation, Mineral, MineralCatalog};
pub use crate::geo::{GeoBounds, LatLng};
pub use crate::render::{BevyMapSurface, MapCapability, PopupContent, RecordingMap, TileLayer};
pub use crate::sdk::{ExportReport, MineralMapBuilder};
pub use crate::sync::{MapView, MarkerViewSync, ViewOptions, ViewState};
