mod catalog;
mod model;

pub use catalog::{catalog, MineralCatalog};
pub use model::{MineLocation, Mineral};

/// Mineral selected when nothing else is configured.
pub const DEFAULT_MINERAL: &str = "aluminum";
