use pushbox_core::{CellType, GridCoord};
use pushbox_level::{export_level, import_level, validate_level, LevelModel, Violation};

fn editor_grid(name: &str, cells: &[(i32, i32, CellType)]) -> LevelModel {
    let mut level = LevelModel::named(name);
    for coord in level.bounds().iter() {
        level
            .set_position(coord, CellType::Empty)
            .expect("bounds iterate in range");
    }
    for &(x, y, cell) in cells {
        level
            .set_position(GridCoord::new(x, y), cell)
            .expect("in range");
    }
    level
}

#[test]
fn fully_populated_level_round_trips_through_export() {
    let level = editor_grid(
        "Two Boxes",
        &[
            (-5, -5, CellType::Wall),
            (4, 4, CellType::Wall),
            (0, 0, CellType::Player),
            (1, 0, CellType::Box),
            (1, 1, CellType::Box),
            (3, 0, CellType::Goal),
            (3, 1, CellType::Goal),
        ],
    );

    let restored = import_level(&export_level(&level)).expect("exported text imports");

    assert_eq!(restored.name(), "Two Boxes");
    for coord in level.bounds().iter() {
        assert_eq!(
            restored.get_position(coord),
            level.get_position(coord),
            "cell {coord} diverged after round trip"
        );
    }
    assert_eq!(validate_level(&restored), Ok(()));
}

#[test]
fn sparse_and_dense_encodings_are_observationally_equal() {
    let dense = editor_grid("Same", &[(0, 0, CellType::Player)]);
    let mut sparse = LevelModel::named("Same");
    sparse
        .set_position(GridCoord::new(0, 0), CellType::Player)
        .expect("in range");

    let dense = import_level(&export_level(&dense)).expect("dense imports");
    let sparse = import_level(&export_level(&sparse)).expect("sparse imports");

    for coord in dense.bounds().iter() {
        assert_eq!(dense.cell_at(coord), sparse.cell_at(coord));
    }
}

#[test]
fn imported_level_surfaces_first_violation() {
    let text = r#"{
        "LevelName": "Crowded",
        "Structure": [
            {"x": 0, "y": 0, "type": "Player"},
            {"x": 0, "y": 1, "type": "Player"},
            {"x": 1, "y": 0, "type": "Box"},
            {"x": 2, "y": 0, "type": "Goal"}
        ]
    }"#;

    let level = import_level(text).expect("well-formed text imports");
    assert_eq!(validate_level(&level), Err(Violation::MultiplePlayers));
}

#[test]
fn import_rejects_text_that_is_not_a_level() {
    assert!(import_level("[1, 2, 3]").is_err());
    assert!(import_level(r#"{"Structure": []}"#).is_err());
}
