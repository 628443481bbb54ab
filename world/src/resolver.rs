//! Pure move resolution against the static and dynamic layers of a playthrough.

use std::collections::BTreeSet;

use pushbox_core::{Direction, GridBounds, GridCoord, MoveRejection};

/// Fully checked outcome of a legal move, ready to be committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MovePlan {
    pub(crate) from: GridCoord,
    pub(crate) to: GridCoord,
    pub(crate) direction: Direction,
    pub(crate) push: Option<BoxPush>,
}

/// Box displacement carried by a pushing move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BoxPush {
    pub(crate) from: GridCoord,
    pub(crate) to: GridCoord,
}

/// Borrowed layers consulted while resolving a move.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Layers<'a> {
    pub(crate) bounds: GridBounds,
    pub(crate) walls: &'a BTreeSet<GridCoord>,
    pub(crate) boxes: &'a BTreeSet<GridCoord>,
}

/// Decides whether the player at `player` may step in `direction`.
///
/// Checks run in order: level bounds, walls, then the box ahead. A box may
/// only be pushed onto an in-bounds cell that holds neither a wall nor
/// another box.
pub(crate) fn resolve(
    layers: Layers<'_>,
    player: GridCoord,
    direction: Direction,
) -> Result<MovePlan, MoveRejection> {
    let target = player.step(direction);
    if !layers.bounds.contains(target) {
        return Err(MoveRejection::OutOfBounds);
    }
    if layers.walls.contains(&target) {
        return Err(MoveRejection::Wall);
    }

    let push = if layers.boxes.contains(&target) {
        let box_target = target.step(direction);
        if !layers.bounds.contains(box_target)
            || layers.walls.contains(&box_target)
            || layers.boxes.contains(&box_target)
        {
            return Err(MoveRejection::BoxBlocked);
        }
        Some(BoxPush {
            from: target,
            to: box_target,
        })
    } else {
        None
    };

    Ok(MovePlan {
        from: player,
        to: target,
        direction,
        push,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushbox_core::DEFAULT_BOUNDS;

    fn set(cells: &[(i32, i32)]) -> BTreeSet<GridCoord> {
        cells.iter().map(|&(x, y)| GridCoord::new(x, y)).collect()
    }

    #[test]
    fn free_floor_yields_plain_step() {
        let walls = set(&[]);
        let boxes = set(&[]);
        let layers = Layers {
            bounds: DEFAULT_BOUNDS,
            walls: &walls,
            boxes: &boxes,
        };

        let plan = resolve(layers, GridCoord::new(0, 0), Direction::North).expect("legal");
        assert_eq!(plan.to, GridCoord::new(0, 1));
        assert_eq!(plan.push, None);
    }

    #[test]
    fn edge_of_bounds_blocks_player_and_box() {
        let walls = set(&[]);
        let boxes = set(&[(4, 0)]);
        let layers = Layers {
            bounds: DEFAULT_BOUNDS,
            walls: &walls,
            boxes: &boxes,
        };

        assert_eq!(
            resolve(layers, GridCoord::new(-5, 0), Direction::West),
            Err(MoveRejection::OutOfBounds)
        );
        assert_eq!(
            resolve(layers, GridCoord::new(3, 0), Direction::East),
            Err(MoveRejection::BoxBlocked)
        );
    }

    #[test]
    fn box_chain_cannot_be_pushed() {
        let walls = set(&[]);
        let boxes = set(&[(1, 0), (2, 0)]);
        let layers = Layers {
            bounds: DEFAULT_BOUNDS,
            walls: &walls,
            boxes: &boxes,
        };

        assert_eq!(
            resolve(layers, GridCoord::new(0, 0), Direction::East),
            Err(MoveRejection::BoxBlocked)
        );
    }
}
