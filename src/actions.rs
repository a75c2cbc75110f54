use std::fmt;

use crate::game_state::GameState;
use crate::grid::{Cell, Orientation, Wall, WallSets, WALL_GRID_SIZE};
use crate::validation::{is_wall_action_valid, is_wall_placement_free};

/// Up, down, left, right as `(dcol, drow)`.
pub const DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// One turn: move the pawn or place a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Cell),
    PlaceWall(Wall),
}

impl Action {
    pub fn is_wall(&self) -> bool {
        matches!(self, Action::PlaceWall(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(cell) => write!(f, "move {}", cell),
            Action::PlaceWall(wall) => write!(f, "wall {}", wall),
        }
    }
}

/// Visit every pawn destination reachable from `mover` in one turn.
///
/// For each direction whose edge is open: step onto the neighbour, or if the
/// opponent stands there, jump straight over it; when the straight jump is
/// off the board or walled, side-step to either cell beside the opponent.
/// The same cell may be visited twice; [`valid_pawn_moves`] deduplicates.
pub fn for_each_pawn_move<F: FnMut(Cell)>(
    mover: Cell,
    opponent: Cell,
    walls: &WallSets,
    mut visit: F,
) {
    for (dc, dr) in DIRECTIONS {
        let Some(next) = mover.offset(dc, dr) else {
            continue;
        };

        // A wall on this edge rules out both the step and any jump through it
        if walls.is_wall_between(mover, next) {
            continue;
        }

        if next != opponent {
            visit(next);
            continue;
        }

        match next.offset(dc, dr) {
            Some(jump) if !walls.is_wall_between(next, jump) => visit(jump),
            _ => {
                for (pc, pr) in [(dr, dc), (-dr, -dc)] {
                    if let Some(side) = next.offset(pc, pr) {
                        if !walls.is_wall_between(next, side) {
                            visit(side);
                        }
                    }
                }
            }
        }
    }
}

/// Get all legal pawn destinations, deduplicated, in direction order.
pub fn valid_pawn_moves(mover: Cell, opponent: Cell, walls: &WallSets) -> Vec<Cell> {
    let mut moves = Vec::with_capacity(5);
    for_each_pawn_move(mover, opponent, walls, |cell| {
        if !moves.contains(&cell) {
            moves.push(cell);
        }
    });
    moves
}

/// Walls worth considering during search: anchors within `radius` of the
/// opponent's pawn that pass the local placement check.
///
/// Path legality is not checked here; the search verifies it when it
/// expands the child. Empty when the side to move has no walls left.
pub fn candidate_wall_actions(state: &GameState, radius: u8) -> Vec<Wall> {
    let mover = state.current_player();
    if state.walls_remaining(mover) == 0 || radius == 0 {
        return Vec::new();
    }

    let target = state.position(mover.opponent());
    let radius = radius as i16;
    let lo = |v: u8| (v as i16 - radius).max(0) as u8;
    let hi = |v: u8| (v as i16 + radius - 1).min(WALL_GRID_SIZE as i16 - 1) as u8;

    let mut walls = Vec::new();
    for row in lo(target.row)..=hi(target.row) {
        for col in lo(target.col)..=hi(target.col) {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let wall = Wall {
                    orientation,
                    anchor: Cell::new(col, row),
                };
                if is_wall_placement_free(state.walls(), wall) {
                    walls.push(wall);
                }
            }
        }
    }
    walls
}

/// Get every fully legal wall placement for the side to move, path check included.
pub fn valid_wall_actions(state: &GameState) -> Vec<Wall> {
    if state.walls_remaining(state.current_player()) == 0 {
        return Vec::new();
    }

    let mut walls = Vec::new();
    for row in 0..WALL_GRID_SIZE {
        for col in 0..WALL_GRID_SIZE {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let wall = Wall {
                    orientation,
                    anchor: Cell::new(col, row),
                };
                if is_wall_action_valid(state, wall) {
                    walls.push(wall);
                }
            }
        }
    }
    walls
}

/// Every legal action for the side to move: pawn moves first, then walls.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    state
        .valid_pawn_moves()
        .into_iter()
        .map(Action::Move)
        .chain(valid_wall_actions(state).into_iter().map(Action::PlaceWall))
        .collect()
}
