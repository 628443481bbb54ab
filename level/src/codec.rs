//! JSON persistence for [`LevelModel`] values.
//!
//! The persisted record carries the level name under `LevelName` and the
//! explicit cells under `Structure`, each entry holding `x`, `y` and a `type`
//! tag. Older level files tag cells by index in the alphabetical order
//! `Box, Empty, Goal, Player, Wall`; those are accepted on decode, while
//! encoding always writes the tag name.

use std::collections::HashSet;

use pushbox_core::{CellType, GridBounds, GridCoord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::LevelModel;

const LEGACY_CELL_ORDER: [CellType; 5] = [
    CellType::Box,
    CellType::Empty,
    CellType::Goal,
    CellType::Player,
    CellType::Wall,
];

/// Errors that can occur while decoding persisted level text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The provided text was empty or contained only whitespace.
    #[error("level text was empty")]
    Empty,
    /// The text is not a well-formed level record.
    #[error("could not parse level record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
    /// A numeric cell tag did not map to any cell type.
    #[error("unknown cell tag {tag} at {coord}")]
    UnknownCellTag {
        /// Numeric tag found in the record.
        tag: u8,
        /// Coordinate the tag was attached to.
        coord: GridCoord,
    },
    /// A structure entry lies outside the level bounds.
    #[error("structure entry {coord} is outside the level bounds ({bounds})")]
    OutOfBounds {
        /// Coordinate of the offending entry.
        coord: GridCoord,
        /// Bounds the entry was checked against.
        bounds: GridBounds,
    },
    /// The same coordinate appears more than once.
    #[error("structure lists {coord} more than once")]
    DuplicateCoordinate {
        /// Coordinate that was repeated.
        coord: GridCoord,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct LevelRecord {
    #[serde(rename = "LevelName")]
    level_name: String,
    #[serde(rename = "Structure")]
    structure: Vec<PositionRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PositionRecord {
    x: i32,
    y: i32,
    #[serde(rename = "type")]
    tag: CellTag,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum CellTag {
    Named(CellType),
    Legacy(u8),
}

impl CellTag {
    fn resolve(self, coord: GridCoord) -> Result<CellType, ParseError> {
        match self {
            Self::Named(cell) => Ok(cell),
            Self::Legacy(tag) => LEGACY_CELL_ORDER
                .get(usize::from(tag))
                .copied()
                .ok_or(ParseError::UnknownCellTag { tag, coord }),
        }
    }
}

/// Serialises the level name and every explicit cell into pretty-printed
/// JSON. Output is deterministic: cells are written in coordinate order.
#[must_use]
pub fn encode(level: &LevelModel) -> String {
    let record = LevelRecord {
        level_name: level.name().to_owned(),
        structure: level
            .explicit_cells()
            .map(|(coord, cell)| PositionRecord {
                x: coord.x(),
                y: coord.y(),
                tag: CellTag::Named(cell),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&record).expect("level record serialization never fails")
}

/// Reconstructs a level from text produced by [`encode`].
pub fn decode(text: &str) -> Result<LevelModel, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let record: LevelRecord = serde_json::from_str(trimmed)?;
    let mut level = LevelModel::named(record.level_name);
    let bounds = level.bounds();
    let mut seen = HashSet::with_capacity(record.structure.len());

    for entry in record.structure {
        let coord = GridCoord::new(entry.x, entry.y);
        if !bounds.contains(coord) {
            return Err(ParseError::OutOfBounds { coord, bounds });
        }
        if !seen.insert(coord) {
            return Err(ParseError::DuplicateCoordinate { coord });
        }
        let cell = entry.tag.resolve(coord)?;
        level
            .set_position(coord, cell)
            .map_err(|error| ParseError::OutOfBounds {
                coord: error.coord,
                bounds: error.bounds,
            })?;
    }

    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> LevelModel {
        let mut level = LevelModel::named("Corridor");
        for (x, y, cell) in [
            (-1, 0, CellType::Player),
            (0, 0, CellType::Box),
            (1, 0, CellType::Goal),
            (2, 0, CellType::Wall),
            (3, 0, CellType::Empty),
        ] {
            level
                .set_position(GridCoord::new(x, y), cell)
                .expect("in range");
        }
        level
    }

    #[test]
    fn round_trip_preserves_name_and_every_cell() {
        let level = sample_level();
        let decoded = decode(&encode(&level)).expect("level decodes");

        assert_eq!(decoded.name(), level.name());
        for coord in level.bounds().iter() {
            assert_eq!(decoded.cell_at(coord), level.cell_at(coord), "{coord}");
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(encode(&sample_level()), encode(&sample_level()));
    }

    #[test]
    fn encoded_record_uses_persisted_field_names() {
        let encoded = encode(&sample_level());
        assert!(encoded.contains("\"LevelName\": \"Corridor\""));
        assert!(encoded.contains("\"Structure\""));
        assert!(encoded.contains("\"type\": \"Player\""));
    }

    #[test]
    fn absent_structure_entries_decode_as_empty() {
        let level = decode(r#"{"LevelName":"Sparse","Structure":[{"x":0,"y":0,"type":"Wall"}]}"#)
            .expect("level decodes");
        assert_eq!(level.cell_at(GridCoord::new(0, 0)), CellType::Wall);
        assert_eq!(level.cell_at(GridCoord::new(1, 1)), CellType::Empty);
    }

    #[test]
    fn legacy_numeric_tags_are_accepted() {
        let level = decode(
            r#"{"LevelName":"Old","Structure":[{"x":0,"y":0,"type":0},{"x":1,"y":0,"type":4}]}"#,
        )
        .expect("level decodes");
        assert_eq!(level.cell_at(GridCoord::new(0, 0)), CellType::Box);
        assert_eq!(level.cell_at(GridCoord::new(1, 0)), CellType::Wall);
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(decode("   "), Err(ParseError::Empty)));
        assert!(matches!(decode("{"), Err(ParseError::InvalidRecord(_))));
        assert!(matches!(
            decode(r#"{"LevelName":"x","Structure":[{"x":0,"y":0,"type":"Lava"}]}"#),
            Err(ParseError::InvalidRecord(_))
        ));
        assert!(matches!(
            decode(r#"{"LevelName":"x","Structure":[{"x":0,"y":0,"type":9}]}"#),
            Err(ParseError::UnknownCellTag { tag: 9, .. })
        ));
    }

    #[test]
    fn entries_outside_bounds_are_rejected() {
        let error = decode(r#"{"LevelName":"x","Structure":[{"x":7,"y":0,"type":"Wall"}]}"#)
            .expect_err("outside bounds");
        assert!(matches!(
            error,
            ParseError::OutOfBounds { coord, .. } if coord == GridCoord::new(7, 0)
        ));
    }

    #[test]
    fn duplicate_coordinates_are_rejected() {
        let error = decode(
            r#"{"LevelName":"x","Structure":[{"x":0,"y":0,"type":"Wall"},{"x":0,"y":0,"type":"Box"}]}"#,
        )
        .expect_err("duplicate");
        assert!(matches!(error, ParseError::DuplicateCoordinate { .. }));
    }
}
