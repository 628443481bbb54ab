#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative playthrough state management for Pushbox.
//!
//! A [`GameState`] is built fresh from a validated level at the start of every
//! playthrough and discarded on restart or exit. All mutation flows through
//! [`apply`] (or [`request_move`] for callers that want the outcome directly);
//! read access goes through the [`query`] module.

mod resolver;

use std::{collections::BTreeSet, time::Duration};

use pushbox_core::{
    Axis, CellType, Command, Event, GridBounds, GridCoord, MoveInput, MoveOutcome, MoveRejection,
    MoveTiming,
};
use pushbox_level::{validator, LevelModel, Violation};
use thiserror::Error;
use tracing::{debug, trace};

use crate::resolver::{Layers, MovePlan};

/// Errors raised while building a playthrough from a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// The level breaks a playability rule and cannot be played.
    #[error("level is not playable: {0}")]
    InvalidLevel(#[from] Violation),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Moving { elapsed: Duration },
}

/// Represents the authoritative state of a single playthrough.
#[derive(Clone, Debug)]
pub struct GameState {
    bounds: GridBounds,
    walls: BTreeSet<GridCoord>,
    goals: BTreeSet<GridCoord>,
    boxes: BTreeSet<GridCoord>,
    player: GridCoord,
    last_axis: Option<Axis>,
    phase: Phase,
    timing: MoveTiming,
}

impl GameState {
    /// Starts a playthrough of `level` using the default move timing.
    pub fn new(level: &LevelModel) -> Result<Self, StateError> {
        Self::with_timing(level, MoveTiming::default())
    }

    /// Starts a playthrough of `level` using the provided move timing.
    ///
    /// The level must pass validation; walls and goals are frozen for the
    /// lifetime of the returned state.
    pub fn with_timing(level: &LevelModel, timing: MoveTiming) -> Result<Self, StateError> {
        validator::validate(level)?;

        let collect = |cell| level.positions_of(cell).collect::<BTreeSet<_>>();
        let players = collect(CellType::Player);
        let player = players
            .first()
            .copied()
            .ok_or(StateError::InvalidLevel(Violation::NoPlayer))?;

        let state = Self {
            bounds: level.bounds(),
            walls: collect(CellType::Wall),
            goals: collect(CellType::Goal),
            boxes: collect(CellType::Box),
            player,
            last_axis: None,
            phase: Phase::Idle,
            timing,
        };
        debug!(
            level = level.name(),
            boxes = state.boxes.len(),
            walls = state.walls.len(),
            "playthrough started"
        );
        Ok(state)
    }

    fn layers(&self) -> Layers<'_> {
        Layers {
            bounds: self.bounds,
            walls: &self.walls,
            boxes: &self.boxes,
        }
    }

    fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Moving { .. })
    }

    fn is_solved(&self) -> bool {
        self.goals.iter().all(|goal| self.boxes.contains(goal))
    }

    fn commit(&mut self, plan: MovePlan, out_events: &mut Vec<Event>) {
        if let Some(push) = plan.push {
            let _ = self.boxes.remove(&push.from);
            let _ = self.boxes.insert(push.to);
            debug!(from = %push.from, to = %push.to, "box pushed");
            out_events.push(Event::BoxPushed {
                from: push.from,
                to: push.to,
            });
        }

        self.player = plan.to;
        self.last_axis = Some(plan.direction.axis());
        self.phase = Phase::Moving {
            elapsed: Duration::ZERO,
        };
        debug!(from = %plan.from, to = %plan.to, direction = ?plan.direction, "player moved");
        out_events.push(Event::PlayerMoved {
            from: plan.from,
            to: plan.to,
            direction: plan.direction,
        });

        if self.is_solved() {
            debug!("level solved");
            out_events.push(Event::LevelSolved);
        }
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if let Phase::Moving { elapsed } = self.phase {
            let elapsed = elapsed.saturating_add(dt);
            if elapsed >= self.timing.busy_duration() {
                self.phase = Phase::Idle;
                out_events.push(Event::MoveSettled);
            } else {
                self.phase = Phase::Moving { elapsed };
            }
        }
    }
}

/// Applies the provided command to the state, mutating it deterministically.
pub fn apply(state: &mut GameState, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::RequestMove { input } => {
            let _ = request_move(state, input, out_events);
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            state.advance_clock(dt, out_events);
        }
    }
}

/// Resolves a single move request and reports whether it was accepted.
///
/// Requests arriving while a previous move is still in flight are dropped.
/// Rejected requests leave the state untouched and emit
/// [`Event::MoveRejected`]; accepted ones emit [`Event::PlayerMoved`]
/// (preceded by [`Event::BoxPushed`] for pushes) and, when every goal ends up
/// covered, [`Event::LevelSolved`].
pub fn request_move(
    state: &mut GameState,
    input: MoveInput,
    out_events: &mut Vec<Event>,
) -> MoveOutcome {
    let verdict = if state.is_busy() {
        Err(MoveRejection::Busy)
    } else {
        input
            .resolve(state.last_axis)
            .ok_or(MoveRejection::NoDirection)
            .and_then(|direction| resolver::resolve(state.layers(), state.player, direction))
    };

    match verdict {
        Ok(plan) => {
            state.commit(plan, out_events);
            MoveOutcome::Accepted
        }
        Err(reason) => {
            trace!(?reason, player = %state.player, "move rejected");
            out_events.push(Event::MoveRejected { reason });
            MoveOutcome::Rejected(reason)
        }
    }
}

/// Query functions that provide read-only access to the playthrough state.
pub mod query {
    use std::collections::BTreeSet;

    use super::GameState;
    use pushbox_core::{Axis, GridBounds, GridCoord, MoveTiming};

    /// Reports whether every goal is covered by a box.
    #[must_use]
    pub fn is_solved(state: &GameState) -> bool {
        state.is_solved()
    }

    /// Reports whether a move is still in flight, during which new requests
    /// are dropped.
    #[must_use]
    pub fn is_busy(state: &GameState) -> bool {
        state.is_busy()
    }

    /// Current player position.
    #[must_use]
    pub fn player(state: &GameState) -> GridCoord {
        state.player
    }

    /// Current box positions.
    #[must_use]
    pub fn boxes(state: &GameState) -> &BTreeSet<GridCoord> {
        &state.boxes
    }

    /// Goal positions, fixed for the playthrough.
    #[must_use]
    pub fn goals(state: &GameState) -> &BTreeSet<GridCoord> {
        &state.goals
    }

    /// Wall positions, fixed for the playthrough.
    #[must_use]
    pub fn walls(state: &GameState) -> &BTreeSet<GridCoord> {
        &state.walls
    }

    /// Bounds the playthrough takes place in.
    #[must_use]
    pub fn bounds(state: &GameState) -> GridBounds {
        state.bounds
    }

    /// Axis of the most recent accepted move, if any.
    #[must_use]
    pub fn last_axis(state: &GameState) -> Option<Axis> {
        state.last_axis
    }

    /// Timing parameters driving the busy interval.
    #[must_use]
    pub fn timing(state: &GameState) -> MoveTiming {
        state.timing
    }
}
