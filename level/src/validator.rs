//! Playability checks applied before a level may be saved or played.

use pushbox_core::CellType;
use thiserror::Error;

use crate::model::LevelModel;

/// Rule a level breaks. The display text is the message shown to editors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Violation {
    /// The level has no name.
    #[error("Level name is empty")]
    EmptyName,
    /// The level lacks at least one box or at least one goal.
    #[error("At least one box and goal needed")]
    MissingBoxOrGoal,
    /// Box and goal counts differ.
    #[error("Different number of boxes and goals")]
    BoxGoalCountMismatch,
    /// No player start position was placed.
    #[error("Player is not present")]
    NoPlayer,
    /// More than one player start position was placed.
    #[error("There's more than one player")]
    MultiplePlayers,
}

#[derive(Clone, Copy, Debug)]
struct Census {
    boxes: usize,
    goals: usize,
    players: usize,
}

impl Census {
    fn of(level: &LevelModel) -> Self {
        Self {
            boxes: level.count(CellType::Box),
            goals: level.count(CellType::Goal),
            players: level.count(CellType::Player),
        }
    }
}

/// Checks the level and reports the first rule it breaks.
///
/// Rules are evaluated in a fixed order: name, box/goal presence, box/goal
/// balance, then player count.
pub fn validate(level: &LevelModel) -> Result<(), Violation> {
    match violations(level).first() {
        Some(violation) => Err(*violation),
        None => Ok(()),
    }
}

/// Lists every rule the level breaks, in the same order [`validate`] checks
/// them. An empty list means the level is playable.
#[must_use]
pub fn violations(level: &LevelModel) -> Vec<Violation> {
    let census = Census::of(level);
    let mut found = Vec::new();

    if level.name().is_empty() {
        found.push(Violation::EmptyName);
    }
    if census.boxes < 1 || census.goals < 1 {
        found.push(Violation::MissingBoxOrGoal);
    }
    if census.boxes != census.goals {
        found.push(Violation::BoxGoalCountMismatch);
    }
    match census.players {
        0 => found.push(Violation::NoPlayer),
        1 => {}
        _ => found.push(Violation::MultiplePlayers),
    }

    found
}
