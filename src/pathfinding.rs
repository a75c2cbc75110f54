use crate::actions::for_each_pawn_move;
use crate::grid::{Cell, WallSets, BOARD_SIZE};

const NUM_CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Calculate the shortest number of pawn moves from `start` to `goal_row` using BFS.
///
/// Edges are exactly the pawn moves the move generator allows, with the
/// opponent held at `opponent` for the whole search, so jumps and side-steps
/// around it count as single moves.
///
/// Uses fixed-size arrays for the visited set and queue; every cell is
/// enqueued at most once so 81 slots always suffice.
///
/// # Returns
/// The minimum number of moves, or `None` if the goal row is unreachable.
pub fn distance_to_row(start: Cell, goal_row: u8, opponent: Cell, walls: &WallSets) -> Option<u32> {
    if start.row == goal_row {
        return Some(0);
    }

    let mut visited = [false; NUM_CELLS];
    visited[start.index()] = true;

    let mut queue = [(start, 0u32); NUM_CELLS];
    let mut head = 0;
    let mut tail = 1;

    while head < tail {
        let (cell, steps) = queue[head];
        head += 1;

        let mut found = false;
        for_each_pawn_move(cell, opponent, walls, |next| {
            if found || visited[next.index()] {
                return;
            }
            if next.row == goal_row {
                found = true;
                return;
            }
            visited[next.index()] = true;
            queue[tail] = (next, steps + 1);
            tail += 1;
        });

        if found {
            return Some(steps + 1);
        }
    }

    None
}

/// Check if `start` can still reach `goal_row`.
pub fn path_exists(start: Cell, goal_row: u8, opponent: Cell, walls: &WallSets) -> bool {
    distance_to_row(start, goal_row, opponent, walls).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Wall;

    #[test]
    fn test_distance_to_row_open_board() {
        let walls = WallSets::new();
        let dist = distance_to_row(Cell::new(4, 8), 0, Cell::new(4, 0), &walls);
        assert_eq!(dist, Some(8));
    }

    #[test]
    fn test_distance_to_row_same_row() {
        let walls = WallSets::new();
        assert_eq!(distance_to_row(Cell::new(2, 0), 0, Cell::new(4, 4), &walls), Some(0));
        assert!(path_exists(Cell::new(2, 0), 0, Cell::new(4, 4), &walls));
    }

    #[test]
    fn test_jump_over_opponent_shortens_path() {
        let walls = WallSets::new();
        // Opponent directly ahead: the jump covers two rows in one move
        let dist = distance_to_row(Cell::new(4, 8), 0, Cell::new(4, 7), &walls);
        assert_eq!(dist, Some(7));
    }

    #[test]
    fn test_wall_forces_detour() {
        // A horizontal wall in front of the pawn costs one sideways step
        let walls = WallSets::new().with(Wall::horizontal(4, 7));
        let dist = distance_to_row(Cell::new(4, 8), 0, Cell::new(0, 0), &walls);
        assert_eq!(dist, Some(9));
    }

    #[test]
    fn test_sealed_row_has_no_path() {
        // Four horizontal walls cover columns 0..=7 between rows 4 and 5;
        // a vertical wall closes column 8 from the side.
        let mut walls = WallSets::new();
        for col in [0, 2, 4, 6] {
            walls.insert(Wall::horizontal(col, 4));
        }
        walls.insert(Wall::vertical(7, 4));
        walls.insert(Wall::horizontal(7, 5));

        // (8, 5) can only be entered from above, so row 0 is unreachable from below
        assert_eq!(distance_to_row(Cell::new(4, 8), 0, Cell::new(4, 0), &walls), None);
        assert!(!path_exists(Cell::new(4, 8), 0, Cell::new(4, 0), &walls));
        // Above the seal the board is still open
        assert_eq!(distance_to_row(Cell::new(4, 0), 4, Cell::new(4, 8), &walls), Some(4));
    }

    #[test]
    fn test_probe_does_not_touch_caller_walls() {
        let walls = WallSets::new().with(Wall::horizontal(4, 7));
        let before = walls;
        let _ = distance_to_row(Cell::new(4, 8), 0, Cell::new(4, 0), &walls);
        assert_eq!(walls, before);
    }
}
