use std::fmt::Write as _;

use anyhow::{bail, Result};
use pushbox_core::{Command, Direction, GridCoord, MoveInput, MoveTiming};
use pushbox_level::LevelModel;
use pushbox_system_progress::Progress;
use pushbox_world::{self as world, query, GameState};

/// Outcome of a scripted headless playthrough.
#[derive(Debug)]
pub(crate) struct PlayReport {
    /// Counters gathered from the world events.
    pub progress: Progress,
    /// Requests in the script that the world refused.
    pub rejected: usize,
    /// Final board rendered as text.
    pub board: String,
}

/// Parses a move script into world inputs.
///
/// `U D L R` map to the cardinal directions in either case and the numpad
/// digits `9 7 3 1` to the NE, NW, SE and SW diagonals. Whitespace is ignored.
pub(crate) fn parse_script(script: &str) -> Result<Vec<MoveInput>> {
    let mut inputs = Vec::with_capacity(script.len());
    for (index, symbol) in script.chars().enumerate() {
        let input = match symbol.to_ascii_uppercase() {
            'U' => MoveInput::from_direction(Direction::North),
            'D' => MoveInput::from_direction(Direction::South),
            'L' => MoveInput::from_direction(Direction::West),
            'R' => MoveInput::from_direction(Direction::East),
            '9' => MoveInput::new(1.0, 1.0),
            '7' => MoveInput::new(-1.0, 1.0),
            '3' => MoveInput::new(1.0, -1.0),
            '1' => MoveInput::new(-1.0, -1.0),
            symbol if symbol.is_whitespace() => continue,
            other => bail!("unknown move `{other}` at position {index} of the script"),
        };
        inputs.push(input);
    }
    Ok(inputs)
}

/// Plays `inputs` against `level`, letting every move settle before the
/// next request.
pub(crate) fn play_script(
    level: &LevelModel,
    timing: MoveTiming,
    inputs: &[MoveInput],
) -> Result<PlayReport> {
    let mut state = GameState::with_timing(level, timing)?;
    let mut progress = Progress::new();
    let mut rejected = 0;
    let settle = Command::Tick {
        dt: timing.busy_duration(),
    };

    let mut events = Vec::new();
    for &input in inputs {
        events.clear();
        if !world::request_move(&mut state, input, &mut events).is_accepted() {
            rejected += 1;
        }
        world::apply(&mut state, settle.clone(), &mut events);
        progress.handle(&events);
    }

    Ok(PlayReport {
        progress,
        rejected,
        board: render_board(&state),
    })
}

/// Renders the board top row first using the usual Sokoban glyphs.
#[must_use]
pub(crate) fn render_board(state: &GameState) -> String {
    let bounds = query::bounds(state);
    let mut board = String::new();
    for y in (bounds.min().y()..=bounds.max().y()).rev() {
        for x in bounds.min().x()..=bounds.max().x() {
            board.push(glyph(state, GridCoord::new(x, y)));
        }
        let trimmed = board.trim_end_matches(' ').len();
        board.truncate(trimmed);
        let _ = writeln!(board);
    }
    board
}

fn glyph(state: &GameState, coord: GridCoord) -> char {
    let goal = query::goals(state).contains(&coord);
    if query::walls(state).contains(&coord) {
        '#'
    } else if query::boxes(state).contains(&coord) {
        if goal {
            '*'
        } else {
            '$'
        }
    } else if query::player(state) == coord {
        if goal {
            '+'
        } else {
            '@'
        }
    } else if goal {
        '.'
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushbox_core::CellType;

    fn corridor() -> LevelModel {
        let mut level = LevelModel::named("strip");
        for (x, y, cell) in [
            (-5, 4, CellType::Wall),
            (-4, 4, CellType::Player),
            (-3, 4, CellType::Box),
            (-1, 4, CellType::Goal),
        ] {
            level
                .set_position(GridCoord::new(x, y), cell)
                .expect("in range");
        }
        level
    }

    #[test]
    fn script_accepts_cardinals_and_diagonals() {
        let inputs = parse_script("uDl R\n9731").expect("script parses");
        assert_eq!(inputs.len(), 8);
        assert_eq!(inputs[0], MoveInput::from_direction(Direction::North));
        assert_eq!(inputs[4], MoveInput::new(1.0, 1.0));
    }

    #[test]
    fn script_rejects_unknown_symbols() {
        let error = parse_script("RRX").expect_err("X is not a move");
        assert!(error.to_string().contains("position 2"), "{error}");
    }

    #[test]
    fn renders_top_row_first() {
        let state = GameState::new(&corridor()).expect("valid level");
        let board = render_board(&state);
        let rows: Vec<_> = board.lines().collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], "#@$ .");
        assert!(rows[1..].iter().all(|row| row.is_empty()));
    }

    #[test]
    fn solved_board_shows_box_on_goal() {
        let inputs = parse_script("RR").expect("script parses");
        let report =
            play_script(&corridor(), MoveTiming::default(), &inputs).expect("level plays");

        assert!(report.progress.is_solved());
        assert_eq!(report.progress.move_count(), 2);
        assert_eq!(report.progress.push_count(), 2);
        assert_eq!(report.rejected, 0);
        assert_eq!(report.board.lines().next(), Some("#  @*"));
    }

    #[test]
    fn blocked_moves_are_counted_as_rejected() {
        let inputs = parse_script("LU").expect("script parses");
        let report =
            play_script(&corridor(), MoveTiming::default(), &inputs).expect("level plays");
        assert_eq!(report.rejected, 2);
        assert_eq!(report.progress.move_count(), 0);
    }
}
