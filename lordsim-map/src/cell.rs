//! A single map cell: terrain, building, blocking masks and occupants.

use crate::blocking::{BlockingTable, MovementProfile};
use crate::building::Building;
use crate::catalog::{CatalogError, TerrainCatalog, TerrainClass, TerrainDef, TerrainKind, TerrainTypeId};
use crate::direction::Direction;
use crate::ids::StyleId;
use crate::occupant::{Backpack, StackContainer};
use std::fmt;
use std::sync::Arc;

/// One cell of the terrain grid.
///
/// The terrain-type index is validated against the shared catalog whenever it
/// is set, so cost and classification queries never fail afterwards.
pub struct TerrainCell {
    catalog: Arc<TerrainCatalog>,
    terrain: TerrainTypeId,
    /// Cleared whenever the terrain changes; the tileset re-resolves it.
    style: Option<StyleId>,
    building: Building,
    blocking: BlockingTable,
    backpack: Option<Box<Backpack>>,
    stacks: StackContainer,
}

impl TerrainCell {
    pub fn new(catalog: Arc<TerrainCatalog>, terrain: TerrainTypeId) -> Result<Self, CatalogError> {
        catalog.get(terrain)?;
        Ok(Self {
            catalog,
            terrain,
            style: None,
            building: Building::None,
            blocking: BlockingTable::default(),
            backpack: None,
            stacks: StackContainer::default(),
        })
    }

    pub fn catalog(&self) -> &Arc<TerrainCatalog> {
        &self.catalog
    }

    pub fn terrain_type(&self) -> TerrainTypeId {
        self.terrain
    }

    /// Change the terrain. Drops the style binding even if the type is unchanged.
    pub fn set_terrain_type(&mut self, terrain: TerrainTypeId) -> Result<(), CatalogError> {
        self.catalog.get(terrain)?;
        self.terrain = terrain;
        self.style = None;
        Ok(())
    }

    /// Catalog entry for this cell's terrain.
    pub fn terrain(&self) -> &TerrainDef {
        self.catalog.def(self.terrain)
    }

    pub fn terrain_kind(&self) -> TerrainKind {
        self.terrain().kind
    }

    pub fn style(&self) -> Option<StyleId> {
        self.style
    }

    pub fn set_style(&mut self, style: StyleId) {
        self.style = Some(style);
    }

    pub fn building(&self) -> Building {
        self.building
    }

    pub fn set_building(&mut self, building: Building) {
        self.building = building;
    }

    pub fn has_land_building(&self) -> bool {
        self.building.is_land()
    }

    pub fn has_water_building(&self) -> bool {
        self.building.is_water()
    }

    /// Movement points needed to enter this cell.
    pub fn movement_cost(&self) -> u32 {
        self.catalog
            .adjustment(self.building)
            .apply(self.terrain().movement_cost)
    }

    pub fn is_open_terrain(&self) -> bool {
        self.terrain().class == Some(TerrainClass::Open)
    }

    pub fn is_hilly_terrain(&self) -> bool {
        self.terrain().class == Some(TerrainClass::Hilly)
    }

    pub fn is_city_terrain(&self) -> bool {
        self.terrain().class == Some(TerrainClass::City)
    }

    /// Water with nothing built on it.
    pub fn is_open_water(&self) -> bool {
        self.terrain_kind() == TerrainKind::Water && !self.has_water_building()
    }

    #[inline]
    pub fn is_blocked(&self, profile: MovementProfile, direction: Direction) -> bool {
        self.blocking.is_blocked(profile, direction)
    }

    pub fn set_blocked(&mut self, profile: MovementProfile, direction: Direction, blocked: bool) {
        self.blocking.set_blocked(profile, direction, blocked);
    }

    pub fn blocking(&self) -> &BlockingTable {
        &self.blocking
    }

    pub fn set_blocking(&mut self, blocking: BlockingTable) {
        self.blocking = blocking;
    }

    pub fn backpack(&self) -> Option<&Backpack> {
        self.backpack.as_deref()
    }

    pub fn backpack_mut(&mut self) -> Option<&mut Backpack> {
        self.backpack.as_deref_mut()
    }

    /// Put a container on the cell, returning the one it replaces.
    pub fn set_backpack(&mut self, backpack: Backpack) -> Option<Backpack> {
        self.backpack.replace(Box::new(backpack)).map(|old| *old)
    }

    pub fn take_backpack(&mut self) -> Option<Backpack> {
        self.backpack.take().map(|old| *old)
    }

    pub fn has_plantable_item(&self) -> bool {
        self.backpack()
            .is_some_and(|pack| pack.plantable_item().is_some())
    }

    pub fn stacks(&self) -> &StackContainer {
        &self.stacks
    }

    pub fn stacks_mut(&mut self) -> &mut StackContainer {
        &mut self.stacks
    }

    /// Swap in a new stack container, returning the old one.
    pub fn set_stacks(&mut self, stacks: StackContainer) -> StackContainer {
        std::mem::replace(&mut self.stacks, stacks)
    }
}

impl fmt::Debug for TerrainCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerrainCell")
            .field("terrain", &self.terrain)
            .field("style", &self.style)
            .field("building", &self.building)
            .field("blocking", &self.blocking)
            .field("backpack", &self.backpack)
            .field("stacks", &self.stacks)
            .finish()
    }
}
