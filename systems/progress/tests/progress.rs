use pushbox_core::{CellType, Command, Direction, GridCoord, MoveInput};
use pushbox_level::LevelModel;
use pushbox_system_progress::Progress;
use pushbox_world::{self as world, query, GameState};

fn corridor() -> GameState {
    let mut level = LevelModel::named("corridor");
    for (x, y, cell) in [
        (0, 0, CellType::Player),
        (1, 0, CellType::Box),
        (3, 0, CellType::Goal),
        (0, 1, CellType::Wall),
    ] {
        level
            .set_position(GridCoord::new(x, y), cell)
            .expect("in range");
    }
    GameState::new(&level).expect("corridor is valid")
}

#[test]
fn tracks_a_full_playthrough() {
    let mut state = corridor();
    let mut progress = Progress::new();
    let settle = Command::Tick {
        dt: query::timing(&state).busy_duration(),
    };

    for direction in [Direction::North, Direction::East, Direction::East] {
        let mut events = Vec::new();
        world::apply(
            &mut state,
            Command::RequestMove {
                input: MoveInput::from_direction(direction),
            },
            &mut events,
        );
        world::apply(&mut state, settle.clone(), &mut events);
        progress.handle(&events);
    }

    // North hits the wall; both East moves push the box.
    assert_eq!(progress.move_count(), 2);
    assert_eq!(progress.push_count(), 2);
    assert!(progress.is_solved());
    assert_eq!(progress.is_solved(), query::is_solved(&state));
}

#[test]
fn busy_drops_are_not_counted() {
    let mut state = corridor();
    let mut progress = Progress::new();
    let mut events = Vec::new();

    for _ in 0..3 {
        let _ = world::request_move(
            &mut state,
            MoveInput::from_direction(Direction::South),
            &mut events,
        );
    }
    progress.handle(&events);

    assert_eq!(progress.move_count(), 1);
    assert_eq!(progress.push_count(), 0);
}
