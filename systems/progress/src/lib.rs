#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that tallies playthrough statistics from world events.

use pushbox_core::Event;

/// Move and push counters for a single playthrough.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    moves: u32,
    pushes: u32,
    solved: bool,
}

impl Progress {
    /// Creates a tracker with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes events produced by the world and updates the counters.
    ///
    /// Once [`Event::LevelSolved`] has been observed the tracker stays solved
    /// until [`Progress::reset`] is called.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PlayerMoved { .. } => self.moves = self.moves.saturating_add(1),
                Event::BoxPushed { .. } => self.pushes = self.pushes.saturating_add(1),
                Event::LevelSolved => self.solved = true,
                Event::TimeAdvanced { .. }
                | Event::MoveRejected { .. }
                | Event::MoveSettled => {}
            }
        }
    }

    /// Number of accepted player moves.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// Number of accepted moves that pushed a box.
    #[must_use]
    pub fn push_count(&self) -> u32 {
        self.pushes
    }

    /// Whether the playthrough has been solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Clears all counters, as on a level restart.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
