pub(crate) mod graticule;
pub(crate) mod markers;
pub(crate) mod picking;

pub use graticule::graticule_plugin;
pub use markers::{marker_plugin, MapCamera, MineralView, SelectMineral};
pub use picking::{picking_plugin, SelectedMarker};
