#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure level-editor system that owns the level being authored.
//!
//! The session mutates a [`LevelModel`] one cell at a time, maps the whole
//! grid before saving so the validator sees a fully-populated level, and only
//! hands out exported text for levels that pass validation.

use pushbox_core::{CellType, GridCoord};
use pushbox_level::{codec, validator, LevelModel, OutOfRange, ParseError, Violation};
use tracing::debug;

/// Editing session over a single level.
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    level: LevelModel,
}

impl EditorSession {
    /// Creates a session over an unnamed, empty level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that edits an existing level.
    #[must_use]
    pub fn from_level(level: LevelModel) -> Self {
        Self { level }
    }

    /// Replaces the edited level with one decoded from persisted text.
    ///
    /// On failure the current level is kept.
    pub fn load(&mut self, text: &str) -> Result<(), ParseError> {
        self.level = codec::decode(text)?;
        debug!(level = self.level.name(), "editor loaded level");
        Ok(())
    }

    /// Level as currently edited.
    #[must_use]
    pub fn level(&self) -> &LevelModel {
        &self.level
    }

    /// Name currently assigned to the level.
    #[must_use]
    pub fn name(&self) -> &str {
        self.level.name()
    }

    /// Renames the level.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.level.set_name(name);
    }

    /// Reads the cell at `coord`, treating out-of-range coordinates as empty.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> CellType {
        self.level.cell_at(coord)
    }

    /// Stores `cell` at `coord`.
    pub fn paint(&mut self, coord: GridCoord, cell: CellType) -> Result<(), OutOfRange> {
        self.level.set_position(coord, cell)
    }

    /// Advances the cell at `coord` to the next palette entry and returns
    /// the new cell type.
    pub fn cycle_cell(&mut self, coord: GridCoord) -> Result<CellType, OutOfRange> {
        let next = self.level.get_position(coord)?.next_in_palette();
        self.level.set_position(coord, next)?;
        Ok(next)
    }

    /// Makes every in-bounds coordinate explicit, filling gaps with
    /// [`CellType::Empty`].
    pub fn map_grid(&mut self) {
        let bounds = self.level.bounds();
        for coord in bounds.iter() {
            let cell = self.level.cell_at(coord);
            // Coordinates come from the level's own bounds.
            let _ = self.level.set_position(coord, cell);
        }
    }

    /// Maps the grid, validates it and returns the exported text.
    ///
    /// The first broken rule is returned instead when validation fails; its
    /// display text is the message to show the author.
    pub fn save(&mut self) -> Result<String, Violation> {
        self.map_grid();
        validator::validate(&self.level)?;
        debug!(level = self.level.name(), "editor saved level");
        Ok(codec::encode(&self.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_grid_makes_every_cell_explicit() {
        let mut session = EditorSession::new();
        session
            .paint(GridCoord::new(0, 0), CellType::Wall)
            .expect("in range");

        session.map_grid();

        let level = session.level();
        assert_eq!(level.explicit_cells().count(), 100);
        assert_eq!(level.count(CellType::Wall), 1);
        assert_eq!(level.count(CellType::Empty), 99);
    }

    #[test]
    fn cycle_wraps_through_palette() {
        let mut session = EditorSession::new();
        let coord = GridCoord::new(2, -3);
        let seen: Vec<_> = (0..5)
            .map(|_| session.cycle_cell(coord).expect("in range"))
            .collect();

        assert_eq!(
            seen,
            vec![
                CellType::Wall,
                CellType::Box,
                CellType::Goal,
                CellType::Player,
                CellType::Empty
            ]
        );
    }

    #[test]
    fn cycle_outside_bounds_changes_nothing() {
        let mut session = EditorSession::new();
        assert!(session.cycle_cell(GridCoord::new(9, 9)).is_err());
        assert_eq!(session.level().explicit_cells().count(), 0);
    }
}
