//! Mineral map: mining locations in India with a per-mineral marker filter.
//!
//! Library root: static catalog, selection/view synchronizer, the map
//! capability trait with its Bevy and recording implementations, and the
//! egui shell.

pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod render;
pub mod scene;
pub mod sync;
pub mod ui;

pub mod prelude;
pub mod sdk;

pub use data::{catalog, MineLocation, Mineral, MineralCatalog};
pub use error::{CatalogError, ConfigError};
pub use render::{MapCapability, PopupContent, RecordingMap, TileLayer};
pub use scene::{MineralView, SelectMineral, SelectedMarker};
pub use sync::{MapView, MarkerViewSync, ViewOptions, ViewState};
