//! Sparse in-memory level layout.

use std::collections::BTreeMap;

use pushbox_core::{CellType, GridBounds, GridCoord, DEFAULT_BOUNDS};
use thiserror::Error;
use tracing::warn;

/// Reported when a coordinate outside the level bounds is read or written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("position {coord} is outside the level bounds ({bounds})")]
pub struct OutOfRange {
    /// Coordinate that was requested.
    pub coord: GridCoord,
    /// Bounds the coordinate was checked against.
    pub bounds: GridBounds,
}

/// Static layout of a level: its name plus one cell type per coordinate.
///
/// Coordinates without an explicit entry are implicitly
/// [`CellType::Empty`]. Every explicit entry lies inside [`LevelModel::bounds`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelModel {
    name: String,
    bounds: GridBounds,
    cells: BTreeMap<GridCoord, CellType>,
}

impl LevelModel {
    /// Creates an unnamed level where every cell is empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            bounds: DEFAULT_BOUNDS,
            cells: BTreeMap::new(),
        }
    }

    /// Creates an empty level with the provided name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Name of the level. May be empty while editing.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the level name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Region that contains every valid coordinate.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Stores `cell` at `coord`, overwriting any previous entry.
    ///
    /// Coordinates outside the bounds are reported and leave the model
    /// untouched.
    pub fn set_position(&mut self, coord: GridCoord, cell: CellType) -> Result<(), OutOfRange> {
        let coord = self.check(coord)?;
        let _ = self.cells.insert(coord, cell);
        Ok(())
    }

    /// Returns the cell stored at `coord`, or [`CellType::Empty`] when nothing
    /// is stored there.
    pub fn get_position(&self, coord: GridCoord) -> Result<CellType, OutOfRange> {
        let coord = self.check(coord)?;
        Ok(self.cells.get(&coord).copied().unwrap_or_default())
    }

    /// Neutral read: like [`LevelModel::get_position`] but yields
    /// [`CellType::Empty`] for out-of-range coordinates after reporting them.
    #[must_use]
    pub fn cell_at(&self, coord: GridCoord) -> CellType {
        self.get_position(coord).unwrap_or_default()
    }

    /// Iterates the explicitly stored entries in coordinate order.
    pub fn explicit_cells(&self) -> impl Iterator<Item = (GridCoord, CellType)> + '_ {
        self.cells.iter().map(|(coord, cell)| (*coord, *cell))
    }

    /// Iterates the coordinates explicitly tagged with `cell`.
    pub fn positions_of(&self, cell: CellType) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells
            .iter()
            .filter(move |(_, stored)| **stored == cell)
            .map(|(coord, _)| *coord)
    }

    /// Counts the coordinates explicitly tagged with `cell`.
    #[must_use]
    pub fn count(&self, cell: CellType) -> usize {
        self.positions_of(cell).count()
    }

    fn check(&self, coord: GridCoord) -> Result<GridCoord, OutOfRange> {
        if self.bounds.contains(coord) {
            Ok(coord)
        } else {
            let error = OutOfRange {
                coord,
                bounds: self.bounds,
            };
            warn!(%error, "level access out of range");
            Err(error)
        }
    }
}

impl Default for LevelModel {
    fn default() -> Self {
        Self::new()
    }
}
