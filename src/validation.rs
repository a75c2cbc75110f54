use crate::actions::valid_pawn_moves;
use crate::error::{OverlapKind, RuleError};
use crate::game_state::GameState;
use crate::grid::{Cell, Orientation, Wall, WallSets};

/// Check the local legality of a wall: anchor in bounds, no collinear overlap
/// with a wall of the same orientation, no crossing wall at the same anchor.
///
/// Doesn't check that the pawns can still reach their goals; a wall passing
/// here may still be illegal because it seals a pawn in.
pub fn check_wall_placement(walls: &WallSets, wall: Wall) -> Result<(), RuleError> {
    let anchor = wall.anchor;
    if !wall.is_anchor_in_bounds() {
        return Err(RuleError::OutOfBounds {
            col: anchor.col,
            row: anchor.row,
        });
    }

    let (c, r) = (anchor.col as i16, anchor.row as i16);
    // Each wall spans two units, so the anchors on either side along the
    // wall's own line would overlap it
    let collinear = match wall.orientation {
        Orientation::Horizontal => [(c, r), (c - 1, r), (c + 1, r)],
        Orientation::Vertical => [(c, r), (c, r - 1), (c, r + 1)],
    };
    let same = walls.get(wall.orientation);
    if collinear.iter().any(|&(c, r)| same.contains_at(c, r)) {
        return Err(RuleError::WallOverlap {
            wall,
            kind: OverlapKind::Collinear,
        });
    }

    if walls.get(wall.orientation.perpendicular()).contains(anchor) {
        return Err(RuleError::WallOverlap {
            wall,
            kind: OverlapKind::Crossing,
        });
    }

    Ok(())
}

/// Check if a wall placement would hit the board edge or an existing wall.
pub fn is_wall_placement_free(walls: &WallSets, wall: Wall) -> bool {
    check_wall_placement(walls, wall).is_ok()
}

/// Full legality of a wall for the side to move.
///
/// On success returns the wall sets with the wall added; the state passed in
/// is never modified.
pub fn check_wall_action(state: &GameState, wall: Wall) -> Result<WallSets, RuleError> {
    let mover = state.current_player();
    if state.walls_remaining(mover) == 0 {
        return Err(RuleError::WallExhausted {
            player: mover.number(),
        });
    }

    check_wall_placement(state.walls(), wall)?;

    let mut probe = *state;
    probe.walls.insert(wall);
    if !probe.all_paths_open() {
        return Err(RuleError::PathBlocked { wall });
    }

    Ok(probe.walls)
}

pub fn is_wall_action_valid(state: &GameState, wall: Wall) -> bool {
    check_wall_action(state, wall).is_ok()
}

/// Validate a pawn destination for the side to move.
pub fn check_move_action(state: &GameState, destination: Cell) -> Result<(), RuleError> {
    if !destination.is_on_board() {
        return Err(RuleError::OutOfBounds {
            col: destination.col,
            row: destination.row,
        });
    }

    let mover = state.current_player();
    let moves = valid_pawn_moves(
        state.position(mover),
        state.position(mover.opponent()),
        state.walls(),
    );
    if !moves.contains(&destination) {
        return Err(RuleError::NotAValidDestination {
            col: destination.col,
            row: destination.row,
        });
    }

    Ok(())
}

pub fn is_move_action_valid(state: &GameState, destination: Cell) -> bool {
    check_move_action(state, destination).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Player;

    #[test]
    fn test_collinear_overlap_rejected() {
        let walls = WallSets::new().with(Wall::horizontal(4, 4));

        for col in [3, 4, 5] {
            assert_eq!(
                check_wall_placement(&walls, Wall::horizontal(col, 4)),
                Err(RuleError::WallOverlap {
                    wall: Wall::horizontal(col, 4),
                    kind: OverlapKind::Collinear
                })
            );
        }

        // Two units away along the line, or on another row, is fine
        assert!(is_wall_placement_free(&walls, Wall::horizontal(2, 4)));
        assert!(is_wall_placement_free(&walls, Wall::horizontal(6, 4)));
        assert!(is_wall_placement_free(&walls, Wall::horizontal(4, 5)));
    }

    #[test]
    fn test_vertical_collinear_overlap() {
        let walls = WallSets::new().with(Wall::vertical(4, 4));
        assert!(!is_wall_placement_free(&walls, Wall::vertical(4, 3)));
        assert!(!is_wall_placement_free(&walls, Wall::vertical(4, 5)));
        assert!(is_wall_placement_free(&walls, Wall::vertical(4, 2)));
        assert!(is_wall_placement_free(&walls, Wall::vertical(4, 6)));
        assert!(is_wall_placement_free(&walls, Wall::vertical(3, 4)));
    }

    #[test]
    fn test_crossing_rejected() {
        let walls = WallSets::new().with(Wall::vertical(2, 6));
        assert_eq!(
            check_wall_placement(&walls, Wall::horizontal(2, 6)),
            Err(RuleError::WallOverlap {
                wall: Wall::horizontal(2, 6),
                kind: OverlapKind::Crossing
            })
        );
        // Perpendicular walls at neighbouring anchors form a T, which is allowed
        assert!(is_wall_placement_free(&walls, Wall::horizontal(1, 6)));
        assert!(is_wall_placement_free(&walls, Wall::horizontal(3, 6)));
    }

    #[test]
    fn test_anchor_out_of_bounds() {
        let walls = WallSets::new();
        assert_eq!(
            check_wall_placement(&walls, Wall::horizontal(8, 0)),
            Err(RuleError::OutOfBounds { col: 8, row: 0 })
        );
        assert!(!is_wall_placement_free(&walls, Wall::vertical(0, 8)));
        assert!(is_wall_placement_free(&walls, Wall::vertical(7, 7)));
    }

    #[test]
    fn test_wall_action_requires_supply() {
        let state = GameState::from_parts(
            [Cell::new(4, 8), Cell::new(4, 0)],
            WallSets::new(),
            [0, 3],
            Player::One,
        );
        assert_eq!(
            check_wall_action(&state, Wall::horizontal(0, 0)),
            Err(RuleError::WallExhausted { player: 1 })
        );
    }

    #[test]
    fn test_wall_action_rejects_sealing_wall() {
        // Pawn 1 in the bottom-left corner with a wall above columns 0 and 1;
        // a vertical wall right of column 1 closes the pocket
        let walls = WallSets::new().with(Wall::horizontal(0, 7));
        let state = GameState::from_parts(
            [Cell::new(0, 8), Cell::new(4, 0)],
            walls,
            [10, 10],
            Player::Two,
        );
        let sealing = Wall::vertical(1, 7);
        assert!(is_wall_placement_free(state.walls(), sealing));
        assert_eq!(
            check_wall_action(&state, sealing),
            Err(RuleError::PathBlocked { wall: sealing })
        );
        assert_eq!(state.walls(), &walls);
    }

    #[test]
    fn test_wall_action_returns_updated_walls() {
        let state = GameState::new();
        let walls = check_wall_action(&state, Wall::vertical(1, 1)).unwrap();
        assert!(walls.contains(Wall::vertical(1, 1)));
        assert!(state.walls().is_empty());
    }

    #[test]
    fn test_move_action_validation() {
        let state = GameState::new();
        assert!(is_move_action_valid(&state, Cell::new(4, 7)));
        assert_eq!(
            check_move_action(&state, Cell::new(4, 6)),
            Err(RuleError::NotAValidDestination { col: 4, row: 6 })
        );
        assert_eq!(
            check_move_action(&state, Cell::new(4, 9)),
            Err(RuleError::OutOfBounds { col: 4, row: 9 })
        );
    }
}
