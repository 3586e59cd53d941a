//! # Terrain accessibility model
//!
//! Map cells, what they cost to enter, which way a force may leave them, and
//! how they classify for combat bonuses.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`TerrainCatalog`] | Terrain definitions: base cost, kind, combat class, building adjustments |
//! | [`TerrainCell`] | One cell: terrain index, style, building, blocking masks, occupants |
//! | [`BlockingTable`] | Blocked directions per [`MovementProfile`] |
//! | [`TerrainGrid`] | The map; keeps blocking in sync with terrain and buildings |
//! | [`Accessibility`] | Neighbours / step cost / heuristic for an external path search |
//!
//! Flying forces are not represented in the blocking masks. Query with
//! [`Mobility::Flying`] and the masks are skipped.

pub mod blocking;
pub mod building;
pub mod catalog;
pub mod cell;
pub mod direction;
pub mod grid;
pub mod ids;
pub mod object;
pub mod occupant;

pub use blocking::{BlockingTable, Mobility, MovementProfile};
pub use building::Building;
pub use catalog::{
    BuildingAdjustment, CatalogError, TerrainCatalog, TerrainClass, TerrainDef, TerrainKind,
    TerrainTypeId,
};
pub use cell::TerrainCell;
pub use direction::{Direction, Position};
pub use grid::{Accessibility, MapError, TerrainGrid};
pub use ids::{ItemId, PlayerId, StackId, StyleId};
pub use object::{Identified, Owned, Placed};
pub use occupant::{Backpack, Item, StackContainer, StackRef};
