#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pushbox puzzle engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game state, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Level data is expressed with the closed
//! [`CellType`] set over [`GridCoord`] positions inside fixed [`GridBounds`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Logical content of a single level cell.
///
/// The persisted level format stores exactly one tag per coordinate, so a box
/// resting on a goal is never represented here; the runtime state tracks boxes
/// and goals as independent facts instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Walkable floor with nothing on it.
    #[default]
    Empty,
    /// Impassable wall.
    Wall,
    /// Pushable box.
    Box,
    /// Cell that must be covered by a box to win.
    Goal,
    /// Player start position.
    Player,
}

impl CellType {
    /// Every cell type in the order an editor cycles through them.
    pub const PALETTE: [CellType; 5] = [
        CellType::Empty,
        CellType::Wall,
        CellType::Box,
        CellType::Goal,
        CellType::Player,
    ];

    /// Returns the cell type that follows `self` in the editor palette,
    /// wrapping from [`CellType::Player`] back to [`CellType::Empty`].
    #[must_use]
    pub const fn next_in_palette(self) -> Self {
        match self {
            Self::Empty => Self::Wall,
            Self::Wall => Self::Box,
            Self::Box => Self::Goal,
            Self::Goal => Self::Player,
            Self::Player => Self::Empty,
        }
    }

    /// Name used by the persisted level format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Wall => "Wall",
            Self::Box => "Box",
            Self::Goal => "Goal",
            Self::Player => "Player",
        }
    }
}

/// Location of a single grid cell expressed as signed x and y coordinates.
///
/// `x` grows towards the east and `y` grows towards the north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    x: i32,
    y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring coordinate one step away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive rectangular region that contains every valid level coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    min: GridCoord,
    max: GridCoord,
}

/// Fixed 10x10 extent shared by every level, spanning -5..=4 on both axes.
pub const DEFAULT_BOUNDS: GridBounds =
    GridBounds::from_corners(GridCoord::new(-5, -5), GridCoord::new(4, 4));

impl GridBounds {
    /// Creates bounds spanning the provided inclusive corners.
    #[must_use]
    pub const fn from_corners(min: GridCoord, max: GridCoord) -> Self {
        Self { min, max }
    }

    /// Lowest coordinate on both axes.
    #[must_use]
    pub const fn min(&self) -> GridCoord {
        self.min
    }

    /// Highest coordinate on both axes.
    #[must_use]
    pub const fn max(&self) -> GridCoord {
        self.max
    }

    /// Number of columns covered by the bounds.
    #[must_use]
    pub const fn width(&self) -> u32 {
        span(self.min.x, self.max.x)
    }

    /// Number of rows covered by the bounds.
    #[must_use]
    pub const fn height(&self) -> u32 {
        span(self.min.y, self.max.y)
    }

    /// Reports whether the coordinate lies inside the bounds.
    #[must_use]
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
    }

    /// Iterates every coordinate inside the bounds, column by column.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| GridCoord::new(x, y)))
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        DEFAULT_BOUNDS
    }
}

impl std::fmt::Display for GridBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x {}..={}, y {}..={}",
            self.min.x, self.max.x, self.min.y, self.max.y
        )
    }
}

const fn span(low: i32, high: i32) -> u32 {
    if high < low {
        0
    } else {
        high.abs_diff(low) + 1
    }
}

/// Axis used by a cardinal movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// East-west movement.
    Horizontal,
    /// North-south movement.
    Vertical,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward increasing `y`.
    North,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `y`.
    South,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// Unit offset applied to a coordinate when stepping in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Axis the direction travels along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::East | Self::West => Axis::Horizontal,
            Self::North | Self::South => Axis::Vertical,
        }
    }

    const fn from_unit(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1) => Some(Self::North),
            (1, 0) => Some(Self::East),
            (0, -1) => Some(Self::South),
            (-1, 0) => Some(Self::West),
            _ => None,
        }
    }
}

/// Raw two-axis movement input as delivered by an input device.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    x: f32,
    y: f32,
}

impl MoveInput {
    /// Creates a raw input vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates the input produced by pressing a single cardinal direction.
    #[must_use]
    pub fn from_direction(direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: dx as f32,
            y: dy as f32,
        }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Resolves the input to a single cardinal direction.
    ///
    /// When both components are non-zero the axis used by the previous
    /// accepted move is suppressed: after a vertical move the vertical
    /// component is dropped, otherwise the horizontal one is. The remaining
    /// component is rounded to the nearest integer, halves going to the even
    /// neighbour, and clamped to `-1..=1`.
    /// Returns `None` when nothing is left after rounding.
    #[must_use]
    pub fn resolve(self, last_axis: Option<Axis>) -> Option<Direction> {
        let (mut x, mut y) = (self.x, self.y);
        if x != 0.0 && y != 0.0 {
            if last_axis == Some(Axis::Vertical) {
                y = 0.0;
            } else {
                x = 0.0;
            }
        }

        Direction::from_unit(round_unit(x), round_unit(y))
    }
}

fn round_unit(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    (value.round_ties_even() as i32).clamp(-1, 1)
}

/// Default player speed measured in cells per second.
pub const DEFAULT_MOVE_SPEED: f32 = 8.0;

/// Timing parameters for the Moving to Idle transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveTiming {
    move_speed: f32,
}

impl MoveTiming {
    /// Creates timing for the provided speed in cells per second.
    ///
    /// Speeds that are not strictly positive and finite fall back to
    /// [`DEFAULT_MOVE_SPEED`].
    #[must_use]
    pub fn new(move_speed: f32) -> Self {
        let move_speed = if move_speed.is_finite() && move_speed > 0.0 {
            move_speed
        } else {
            DEFAULT_MOVE_SPEED
        };
        Self { move_speed }
    }

    /// Speed in cells per second.
    #[must_use]
    pub const fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Time the player takes to travel a single cell.
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::try_from_secs_f32(self.move_speed.recip())
            .unwrap_or_else(|_| default_transition())
    }

    /// Total time an accepted move keeps the state busy: the transition
    /// followed by an equally long cooldown.
    #[must_use]
    pub fn busy_duration(&self) -> Duration {
        self.transition().saturating_mul(2)
    }
}

impl Default for MoveTiming {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
        }
    }
}

fn default_transition() -> Duration {
    Duration::from_secs_f32(DEFAULT_MOVE_SPEED.recip())
}

/// Commands that express all permissible game state mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests that the player move according to the raw input.
    RequestMove {
        /// Raw input that is resolved against the previous move's axis.
        input: MoveInput,
    },
    /// Advances the playthrough clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Reasons a move request may be turned down.
///
/// Rejections are ordinary gameplay feedback rather than failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// A previous move is still in flight, so the request was dropped.
    Busy,
    /// The input did not resolve to a cardinal direction.
    NoDirection,
    /// The player would leave the level bounds.
    OutOfBounds,
    /// The player would walk into a wall.
    Wall,
    /// The box ahead cannot move: its destination is outside the bounds,
    /// a wall, or another box.
    BoxBlocked,
}

/// Result of a single move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The player moved and the state entered the busy interval.
    Accepted,
    /// Nothing changed.
    Rejected(MoveRejection),
}

impl MoveOutcome {
    /// Reports whether the move was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the playthrough clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a box was pushed one cell.
    BoxPushed {
        /// Cell the box occupied before the push.
        from: GridCoord,
        /// Cell the box occupies after the push.
        to: GridCoord,
    },
    /// Confirms that the player moved one cell. Emitted exactly once per
    /// accepted move.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: GridCoord,
        /// Cell the player occupies after moving.
        to: GridCoord,
        /// Direction the move resolved to.
        direction: Direction,
    },
    /// Reports that a move request changed nothing.
    MoveRejected {
        /// Specific reason the move was turned down.
        reason: MoveRejection,
    },
    /// Announces that the busy interval of the last move elapsed.
    MoveSettled,
    /// Announces that every goal is covered by a box.
    LevelSolved,
}
