//! The hardcoded mineral and mine tables and their read-only accessor.

use std::collections::HashSet;

use crate::data::model::{MineLocation, Mineral};
use crate::error::CatalogError;
use crate::geo::LatLng;

static MINERALS: [Mineral; 6] = [
    Mineral { id: "aluminum", name: "Aluminum", icon: "🔩" },
    Mineral { id: "copper", name: "Copper", icon: "⚡" },
    Mineral { id: "lithium", name: "Lithium", icon: "🔋" },
    Mineral { id: "steel", name: "Iron & Steel", icon: "🏗️" },
    Mineral { id: "gold", name: "Gold", icon: "💰" },
    Mineral { id: "silver", name: "Silver", icon: "✨" },
];

const fn mine(
    id: &'static str,
    name: &'static str,
    mineral_id: &'static str,
    lat: f64,
    lng: f64,
    region: &'static str,
    production: &'static str,
) -> MineLocation {
    MineLocation {
        id,
        name,
        mineral_id,
        position: LatLng::new(lat, lng),
        region,
        production,
    }
}

#[rustfmt::skip]
static MINE_LOCATIONS: [MineLocation; 19] = [
    mine("nalco", "NALCO Mines", "aluminum", 20.9517, 85.0985, "Odisha", "6.825 million tonnes/year"),
    mine("balco", "BALCO Korba", "aluminum", 22.3475, 82.6875, "Chhattisgarh", "5.7 million tonnes/year"),
    mine("hindalco", "Hindalco Renukoot", "aluminum", 24.2, 83.03, "Uttar Pradesh", "1.3 million tonnes/year"),
    mine("vedanta", "Vedanta Jharsuguda", "aluminum", 21.85, 84.03, "Odisha", "1.8 million tonnes/year"),
    mine("khetri", "Khetri Copper Complex", "copper", 28.0, 75.8, "Rajasthan", "31,000 tonnes/year"),
    mine("maldhara", "Malanjkhand Copper Project", "copper", 22.03, 80.68, "Madhya Pradesh", "2 million tonnes/year"),
    mine("singhbhum", "Singhbhum Copper Belt", "copper", 22.8, 86.2, "Jharkhand", "2.1 million tonnes/year"),
    mine("mandya", "Mandya Lithium Deposit", "lithium", 12.52, 76.9, "Karnataka", "1,600 tonnes/year"),
    mine("jammu", "Reasi Lithium Deposit", "lithium", 33.08, 74.73, "Jammu & Kashmir", "5.9 million tonnes (reserves)"),
    mine("bailadila", "Bailadila Iron Ore Mine", "steel", 18.66, 81.21, "Chhattisgarh", "30 million tonnes/year"),
    mine("kudremukh", "Kudremukh Iron Ore", "steel", 13.25, 75.25, "Karnataka", "7.16 million tonnes/year"),
    mine("daitari", "Daitari Iron Ore Mines", "steel", 21.11, 85.75, "Odisha", "10 million tonnes/year"),
    mine("noamundi", "Noamundi Iron Mine", "steel", 22.16, 85.53, "Jharkhand", "10 million tonnes/year"),
    mine("kolar", "Kolar Gold Fields", "gold", 13.13, 78.13, "Karnataka", "2.3 tonnes/year"),
    mine("hutti", "Hutti Gold Mines", "gold", 16.2, 76.66, "Karnataka", "3.5 tonnes/year"),
    mine("ramagiri", "Ramagiri Gold Fields", "gold", 13.8, 79.7, "Andhra Pradesh", "750 kg/year"),
    mine("zawar", "Zawar Mines", "silver", 24.35, 73.71, "Rajasthan", "84 tonnes/year"),
    mine("tundoo", "Tundoo Lead Smelter", "silver", 24.5, 85.4, "Jharkhand", "60 tonnes/year"),
    mine("hzl", "HZL Zinc Smelter", "silver", 22.7, 70.65, "Gujarat", "700 tonnes/year"),
];

static CATALOG: MineralCatalog = MineralCatalog {
    minerals: &MINERALS,
    mines: &MINE_LOCATIONS,
};

/// The built-in catalog. Immutable for the life of the process.
pub fn catalog() -> &'static MineralCatalog {
    &CATALOG
}

/// Read-only view over a mineral table and a mine table.
#[derive(Debug)]
pub struct MineralCatalog {
    minerals: &'static [Mineral],
    mines: &'static [MineLocation],
}

impl MineralCatalog {
    pub const fn new(minerals: &'static [Mineral], mines: &'static [MineLocation]) -> Self {
        Self { minerals, mines }
    }

    /// Minerals in selector order.
    pub fn minerals(&self) -> &'static [Mineral] {
        self.minerals
    }

    /// Every mine, grouped by mineral in declaration order.
    pub fn mines(&self) -> &'static [MineLocation] {
        self.mines
    }

    pub fn mineral(&self, id: &str) -> Option<&'static Mineral> {
        self.minerals.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.mineral(id).is_some()
    }

    /// Mines of one mineral, in table order. Unknown ids yield an empty set.
    pub fn mines_for(&self, mineral_id: &str) -> Vec<&'static MineLocation> {
        self.mines
            .iter()
            .filter(|m| m.mineral_id == mineral_id)
            .collect()
    }

    /// Checks the foreign-key, uniqueness and coordinate invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut mineral_ids = HashSet::new();
        for mineral in self.minerals {
            if !mineral_ids.insert(mineral.id) {
                return Err(CatalogError::DuplicateMineral(mineral.id));
            }
        }

        let mut mine_ids = HashSet::new();
        for mine in self.mines {
            if !mineral_ids.contains(mine.mineral_id) {
                return Err(CatalogError::UnknownMineral {
                    mine_id: mine.id,
                    mineral_id: mine.mineral_id,
                });
            }
            if !mine_ids.insert((mine.mineral_id, mine.id)) {
                return Err(CatalogError::DuplicateMine {
                    mine_id: mine.id,
                    mineral_id: mine.mineral_id,
                });
            }
            if !mine.position.is_valid() {
                return Err(CatalogError::InvalidPosition {
                    mine_id: mine.id,
                    lat: mine.position.lat,
                    lng: mine.position.lng,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        assert_eq!(catalog().validate(), Ok(()));
    }

    #[test]
    fn every_mineral_has_mines() {
        for mineral in catalog().minerals() {
            assert!(
                !catalog().mines_for(mineral.id).is_empty(),
                "{} has no mines",
                mineral.id
            );
        }
    }

    #[test]
    fn mines_for_keeps_table_order() {
        let ids: Vec<_> = catalog().mines_for("steel").iter().map(|m| m.id).collect();
        assert_eq!(ids, ["bailadila", "kudremukh", "daitari", "noamundi"]);
    }

    #[test]
    fn unknown_mineral_has_no_mines() {
        assert!(catalog().mines_for("unobtainium").is_empty());
        assert!(catalog().mineral("unobtainium").is_none());
    }

    #[test]
    fn dangling_mineral_reference_is_rejected() {
        static MINERALS: [Mineral; 1] = [Mineral { id: "gold", name: "Gold", icon: "💰" }];
        static MINES: [MineLocation; 1] = [mine("x", "X", "tin", 10.0, 10.0, "R", "P")];
        let err = MineralCatalog::new(&MINERALS, &MINES).validate().unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownMineral {
                mine_id: "x",
                mineral_id: "tin"
            }
        );
    }

    #[test]
    fn duplicate_mine_within_mineral_is_rejected() {
        static MINERALS: [Mineral; 1] = [Mineral { id: "gold", name: "Gold", icon: "💰" }];
        static MINES: [MineLocation; 2] = [
            mine("kolar", "A", "gold", 10.0, 10.0, "R", "P"),
            mine("kolar", "B", "gold", 11.0, 11.0, "R", "P"),
        ];
        let err = MineralCatalog::new(&MINERALS, &MINES).validate().unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateMine { mine_id: "kolar", .. }));
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        static MINERALS: [Mineral; 1] = [Mineral { id: "gold", name: "Gold", icon: "💰" }];
        static MINES: [MineLocation; 1] = [mine("bad", "Bad", "gold", 95.0, 10.0, "R", "P")];
        let err = MineralCatalog::new(&MINERALS, &MINES).validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPosition { mine_id: "bad", .. }));
    }
}
