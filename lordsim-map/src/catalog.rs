//! Terrain catalog: base movement costs, combat classes, building adjustments.
//!
//! Cells only store a [`TerrainTypeId`]; everything else about the terrain is
//! looked up here. The catalog is immutable after loading and shared between
//! cells through an `Arc`.
//!
//! JSON format:
//! ```json
//! {
//!   "terrains": [
//!     { "name": "grass", "kind": "grass", "movement_cost": 2, "class": "open" },
//!     { "name": "water", "kind": "water", "movement_cost": 2 }
//!   ],
//!   "building_adjustments": {
//!     "road": { "override": 1 },
//!     "port": { "offset": -1 }
//!   }
//! }
//! ```

use crate::building::Building;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Terrain catalog is empty")]
    Empty,
    #[error("Terrain catalog has {0} entries, more than an index can address")]
    TooLarge(usize),
    #[error("Duplicate terrain name: {0}")]
    DuplicateName(String),
    #[error("Terrain {0} has a movement cost of zero")]
    ZeroCost(String),
    #[error("Unknown terrain type {id} (catalog has {len} entries)")]
    UnknownTerrain { id: TerrainTypeId, len: usize },
}

/// Index of a terrain type in a [`TerrainCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TerrainTypeId(pub u16);

impl TerrainTypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerrainTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical nature of a terrain, used for blocking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Grass,
    Water,
    Forest,
    Hills,
    Mountains,
    Swamp,
    /// Paved ground that cities are built on.
    Void,
}

/// Combat-relevant terrain category. Each terrain has one class or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainClass {
    Open,
    Hilly,
    City,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainDef {
    pub name: String,
    pub kind: TerrainKind,
    /// Movement points to enter a cell of this terrain (>= 1).
    pub movement_cost: u32,
    #[serde(default)]
    pub class: Option<TerrainClass>,
}

impl TerrainDef {
    pub fn new(name: &str, kind: TerrainKind, movement_cost: u32, class: Option<TerrainClass>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            movement_cost,
            class,
        }
    }
}

/// How a building changes the movement cost of the cell it stands on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingAdjustment {
    #[default]
    Unchanged,
    /// Replace the terrain cost outright.
    Override(u32),
    /// Add to the terrain cost.
    Offset(i32),
}

impl BuildingAdjustment {
    /// Apply to a base cost. The result is never below 1.
    pub fn apply(self, base: u32) -> u32 {
        let cost = match self {
            BuildingAdjustment::Unchanged => base,
            BuildingAdjustment::Override(cost) => cost,
            BuildingAdjustment::Offset(delta) => {
                let adjusted = i64::from(base) + i64::from(delta);
                u32::try_from(adjusted.max(0)).unwrap_or(u32::MAX)
            }
        };
        cost.max(1)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    terrains: Vec<TerrainDef>,
    #[serde(default)]
    building_adjustments: BTreeMap<Building, BuildingAdjustment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainCatalog {
    terrains: Vec<TerrainDef>,
    building_adjustments: BTreeMap<Building, BuildingAdjustment>,
}

impl TerrainCatalog {
    /// Build a catalog, validating names and costs.
    pub fn new(
        terrains: Vec<TerrainDef>,
        building_adjustments: BTreeMap<Building, BuildingAdjustment>,
    ) -> Result<Self, CatalogError> {
        if terrains.is_empty() {
            return Err(CatalogError::Empty);
        }
        if terrains.len() > usize::from(u16::MAX) + 1 {
            return Err(CatalogError::TooLarge(terrains.len()));
        }

        let mut seen = HashSet::new();
        for def in &terrains {
            if !seen.insert(def.name.as_str()) {
                return Err(CatalogError::DuplicateName(def.name.clone()));
            }
            if def.movement_cost == 0 {
                return Err(CatalogError::ZeroCost(def.name.clone()));
            }
        }

        Ok(Self {
            terrains,
            building_adjustments,
        })
    }

    /// The default terrain set.
    pub fn standard() -> Self {
        use TerrainClass::*;
        use TerrainKind::*;

        let terrains = vec![
            TerrainDef::new("grass", Grass, 2, Some(Open)),
            TerrainDef::new("water", Water, 2, None),
            TerrainDef::new("forest", Forest, 3, None),
            TerrainDef::new("hills", Hills, 4, Some(Hilly)),
            TerrainDef::new("mountains", Mountains, 6, Some(Hilly)),
            TerrainDef::new("swamp", Swamp, 4, None),
            TerrainDef::new("void", Void, 1, Some(City)),
        ];
        let building_adjustments = BTreeMap::from([
            (Building::City, BuildingAdjustment::Override(1)),
            (Building::Road, BuildingAdjustment::Override(1)),
            (Building::Bridge, BuildingAdjustment::Override(1)),
            (Building::Port, BuildingAdjustment::Override(2)),
        ]);

        Self {
            terrains,
            building_adjustments,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let catalog = Self::new(file.terrains, file.building_adjustments)?;
        log::debug!(
            "Parsed terrain catalog: {} terrains, {} building adjustments",
            catalog.len(),
            catalog.building_adjustments.len()
        );
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} terrain types from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.terrains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terrains.is_empty()
    }

    pub fn contains(&self, id: TerrainTypeId) -> bool {
        id.index() < self.terrains.len()
    }

    pub fn get(&self, id: TerrainTypeId) -> Result<&TerrainDef, CatalogError> {
        self.terrains
            .get(id.index())
            .ok_or(CatalogError::UnknownTerrain {
                id,
                len: self.terrains.len(),
            })
    }

    /// Lookup for ids already checked with [`contains`](Self::contains).
    /// Panics on an out-of-range id.
    pub(crate) fn def(&self, id: TerrainTypeId) -> &TerrainDef {
        &self.terrains[id.index()]
    }

    /// Look a terrain type up by name.
    pub fn find(&self, name: &str) -> Option<TerrainTypeId> {
        self.terrains
            .iter()
            .position(|def| def.name == name)
            .map(|i| TerrainTypeId(i as u16))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerrainTypeId, &TerrainDef)> + '_ {
        self.terrains
            .iter()
            .enumerate()
            .map(|(i, def)| (TerrainTypeId(i as u16), def))
    }

    pub fn adjustment(&self, building: Building) -> BuildingAdjustment {
        self.building_adjustments
            .get(&building)
            .copied()
            .unwrap_or_default()
    }

    /// Movement cost of a terrain with a building on it.
    pub fn adjusted_cost(&self, id: TerrainTypeId, building: Building) -> Result<u32, CatalogError> {
        let def = self.get(id)?;
        Ok(self.adjustment(building).apply(def.movement_cost))
    }
}

impl Default for TerrainCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
