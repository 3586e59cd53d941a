//! The terrain grid and its accessibility graph.
//!
//! The grid owns every [`TerrainCell`] and keeps their blocking masks in sync
//! with terrain and buildings. Path search itself lives with the caller; the
//! [`Accessibility`] trait gives it neighbours, step costs and a heuristic.

use crate::blocking::{BlockingTable, Mobility, MovementProfile};
use crate::building::Building;
use crate::catalog::{CatalogError, TerrainCatalog, TerrainKind, TerrainTypeId};
use crate::cell::TerrainCell;
use crate::direction::{Direction, Position};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Position {0} is outside the map")]
    OutOfBounds(Position),
    #[error("Map dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: u32, height: u32 },
}

/// A graph view of the map for path search.
///
/// `mobility` selects the blocking mask. [`Mobility::Flying`] ignores masks but
/// never leaves the map.
pub trait Accessibility {
    /// Cells reachable in one step, in [`Direction`] index order.
    fn neighbors(&self, from: Position, mobility: Mobility) -> Vec<Position>;

    /// Cost of stepping from `from` into the adjacent cell `to`.
    /// `None` if the step is not allowed.
    fn cost(&self, from: Position, to: Position, mobility: Mobility) -> Option<u32>;

    /// Lower bound on the cost between two cells. Admissible for A*.
    fn heuristic(&self, from: Position, to: Position) -> u32;
}

pub struct TerrainGrid {
    width: u32,
    height: u32,
    catalog: Arc<TerrainCatalog>,
    cells: Vec<TerrainCell>,
}

impl TerrainGrid {
    /// A `width` x `height` map filled with one terrain type, blocking computed.
    pub fn new(
        width: u32,
        height: u32,
        catalog: Arc<TerrainCatalog>,
        fill: TerrainTypeId,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 || i32::try_from(width).is_err() || i32::try_from(height).is_err()
        {
            return Err(MapError::InvalidDimensions { width, height });
        }

        let count = width as usize * height as usize;
        let mut cells = Vec::with_capacity(count);
        for _ in 0..count {
            cells.push(TerrainCell::new(catalog.clone(), fill)?);
        }

        let mut grid = Self {
            width,
            height,
            catalog,
            cells,
        };
        grid.recalculate_blocking();
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn catalog(&self) -> &Arc<TerrainCatalog> {
        &self.catalog
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn cell(&self, pos: Position) -> Option<&TerrainCell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Mutable access to a cell. Terrain and building changes made through
    /// this do not update blocking; use [`set_terrain`](Self::set_terrain) and
    /// [`set_building`](Self::set_building) for those.
    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut TerrainCell> {
        match self.index(pos) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// Every position, row by row. This is the map scan order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Positions within `radius` steps of `center`, row by row, clipped to the map.
    pub fn positions_within(&self, center: Position, radius: u32) -> Vec<Position> {
        let r = i64::from(radius);
        // Clamped to the map, so the work is bounded by the map, not the radius.
        let span = |c: i32, len: u32| {
            let lo = (i64::from(c) - r).max(0);
            let hi = (i64::from(c) + r).min(i64::from(len) - 1);
            (lo, hi)
        };
        let (x_lo, x_hi) = span(center.x, self.width);
        let (y_lo, y_hi) = span(center.y, self.height);

        let mut out = Vec::new();
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                // Dimensions fit in i32, so clamped coordinates do too.
                out.push(Position::new(x as i32, y as i32));
            }
        }
        out
    }

    pub fn set_terrain(&mut self, pos: Position, terrain: TerrainTypeId) -> Result<(), MapError> {
        let cell = self.cell_mut(pos).ok_or(MapError::OutOfBounds(pos))?;
        cell.set_terrain_type(terrain)?;
        self.recalculate_around(pos);
        Ok(())
    }

    pub fn set_building(&mut self, pos: Position, building: Building) -> Result<(), MapError> {
        let cell = self.cell_mut(pos).ok_or(MapError::OutOfBounds(pos))?;
        cell.set_building(building);
        self.recalculate_around(pos);
        Ok(())
    }

    /// Recompute blocking for `pos` and its neighbours.
    pub fn recalculate_around(&mut self, pos: Position) {
        self.recalculate_cell(pos);
        for dir in Direction::ALL {
            self.recalculate_cell(pos.step(dir));
        }
    }

    /// Recompute blocking for every cell.
    #[instrument(skip_all, name = "recalculate_blocking", fields(width = self.width, height = self.height))]
    pub fn recalculate_blocking(&mut self) {
        let positions: Vec<_> = self.positions().collect();
        for pos in positions {
            self.recalculate_cell(pos);
        }
        log::debug!("Recalculated blocking for {}x{} map", self.width, self.height);
    }

    fn recalculate_cell(&mut self, pos: Position) {
        let Some(from) = self.cell(pos) else {
            return;
        };

        let mut table = BlockingTable::default();
        for dir in Direction::ALL {
            let to = self.cell(pos.step(dir));
            for profile in MovementProfile::ALL {
                if avenue_blocked(from, to, dir, profile) {
                    table.set_blocked(profile, dir, true);
                }
            }
        }

        if let Some(cell) = self.cell_mut(pos) {
            if *cell.blocking() != table {
                log::trace!("Blocking at {} changed to {:?}", pos, table);
            }
            cell.set_blocking(table);
        }
    }

    /// Whether a force with `mobility` may step from `from` in `dir`.
    pub fn can_step(&self, from: Position, dir: Direction, mobility: Mobility) -> bool {
        let Some(cell) = self.cell(from) else {
            return false;
        };
        if !self.contains(from.step(dir)) {
            return false;
        }
        match mobility.profile() {
            Some(profile) => !cell.is_blocked(profile, dir),
            None => true,
        }
    }
}

/// Blocking rule for leaving `from` in `dir` towards `to`.
fn avenue_blocked(
    from: &TerrainCell,
    to: Option<&TerrainCell>,
    dir: Direction,
    profile: MovementProfile,
) -> bool {
    let Some(to) = to else {
        return true;
    };

    if profile == MovementProfile::Standard
        && to.terrain_kind() == TerrainKind::Mountains
        && !matches!(to.building(), Building::Road | Building::City)
    {
        return true;
    }

    // Open water only meets land at a port or bridge.
    let dry_land = |cell: &TerrainCell| {
        cell.terrain_kind() != TerrainKind::Water && !cell.building().links_shore()
    };
    if (from.is_open_water() && dry_land(to)) || (to.is_open_water() && dry_land(from)) {
        return true;
    }

    // Bridges are only entered and left orthogonally.
    dir.is_diagonal() && (from.building() == Building::Bridge || to.building() == Building::Bridge)
}

impl Accessibility for TerrainGrid {
    fn neighbors(&self, from: Position, mobility: Mobility) -> Vec<Position> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_step(from, dir, mobility))
            .map(|dir| from.step(dir))
            .collect()
    }

    fn cost(&self, from: Position, to: Position, mobility: Mobility) -> Option<u32> {
        let dir = from.direction_to(to)?;
        if !self.can_step(from, dir, mobility) {
            return None;
        }
        self.cell(to).map(TerrainCell::movement_cost)
    }

    fn heuristic(&self, from: Position, to: Position) -> u32 {
        from.distance(to)
    }
}
