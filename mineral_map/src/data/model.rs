// Static reference records. Every field borrows from the const tables in
// catalog.rs, so records are `Copy` and never owned by the view.

use serde::Serialize;

use crate::geo::LatLng;

/// A named resource category shown in the selector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Mineral {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// A single mining site tied to one mineral.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MineLocation {
    pub id: &'static str,
    pub name: &'static str,
    pub mineral_id: &'static str,
    pub position: LatLng,
    pub region: &'static str,
    pub production: &'static str,
}

impl Mineral {
    /// Selector label, e.g. `🔋 Lithium`.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}
