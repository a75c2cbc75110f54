//! Board geometry and wall storage.
//!
//! Cells are addressed as `(col, row)` on the 9×9 board. A wall is anchored at
//! the intersection below-right of its anchor cell, so anchors range over the
//! 8×8 grid of inner intersections:
//!
//! - a horizontal wall at `(c, r)` separates rows `r` and `r + 1` in columns
//!   `c` and `c + 1`;
//! - a vertical wall at `(c, r)` separates columns `c` and `c + 1` in rows `r`
//!   and `r + 1`.

use std::fmt;

pub const BOARD_SIZE: u8 = 9;
pub const WALL_GRID_SIZE: u8 = BOARD_SIZE - 1;
pub const MAX_WALLS: u8 = 10;

/// A square of the board, `(col, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: u8,
    pub row: u8,
}

impl Cell {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    pub fn is_on_board(self) -> bool {
        self.col < BOARD_SIZE && self.row < BOARD_SIZE
    }

    /// The neighbouring cell in direction `(dc, dr)`, if it is on the board.
    pub fn offset(self, dc: i8, dr: i8) -> Option<Cell> {
        let col = self.col as i16 + dc as i16;
        let row = self.row as i16 + dr as i16;
        if (0..BOARD_SIZE as i16).contains(&col) && (0..BOARD_SIZE as i16).contains(&row) {
            Some(Cell::new(col as u8, row as u8))
        } else {
            None
        }
    }

    /// Row-major index into an 81-entry table.
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A two-unit wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wall {
    pub orientation: Orientation,
    pub anchor: Cell,
}

impl Wall {
    pub const fn horizontal(col: u8, row: u8) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            anchor: Cell::new(col, row),
        }
    }

    pub const fn vertical(col: u8, row: u8) -> Self {
        Self {
            orientation: Orientation::Vertical,
            anchor: Cell::new(col, row),
        }
    }

    pub fn is_anchor_in_bounds(&self) -> bool {
        self.anchor.col < WALL_GRID_SIZE && self.anchor.row < WALL_GRID_SIZE
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        };
        write!(f, "{}{}", tag, self.anchor)
    }
}

/// The anchors occupied by walls of one orientation, packed into 64 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WallSet(u64);

impl WallSet {
    pub const fn empty() -> Self {
        WallSet(0)
    }

    #[inline]
    fn bit(col: u8, row: u8) -> u64 {
        1u64 << (row as u32 * WALL_GRID_SIZE as u32 + col as u32)
    }

    pub fn contains(&self, anchor: Cell) -> bool {
        anchor.col < WALL_GRID_SIZE
            && anchor.row < WALL_GRID_SIZE
            && self.0 & Self::bit(anchor.col, anchor.row) != 0
    }

    /// Signed lookup so callers can probe `col - 1` or `row - 1` without
    /// underflow; anything off the anchor grid is empty.
    #[inline]
    pub fn contains_at(&self, col: i16, row: i16) -> bool {
        (0..WALL_GRID_SIZE as i16).contains(&col)
            && (0..WALL_GRID_SIZE as i16).contains(&row)
            && self.0 & Self::bit(col as u8, row as u8) != 0
    }

    /// Returns false if the anchor is off the grid or already present.
    pub fn insert(&mut self, anchor: Cell) -> bool {
        if anchor.col >= WALL_GRID_SIZE || anchor.row >= WALL_GRID_SIZE || self.contains(anchor) {
            return false;
        }
        self.0 |= Self::bit(anchor.col, anchor.row);
        true
    }

    pub fn remove(&mut self, anchor: Cell) -> bool {
        if !self.contains(anchor) {
            return false;
        }
        self.0 &= !Self::bit(anchor.col, anchor.row);
        true
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Anchors in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        let bits = self.0;
        (0..64u32).filter(move |i| bits & (1u64 << i) != 0).map(|i| {
            Cell::new(
                (i % WALL_GRID_SIZE as u32) as u8,
                (i / WALL_GRID_SIZE as u32) as u8,
            )
        })
    }
}

/// Both wall sets of a position. Copied freely: every probe works on its own
/// value instead of patching shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WallSets {
    pub horizontal: WallSet,
    pub vertical: WallSet,
}

impl WallSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, orientation: Orientation) -> &WallSet {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    pub fn get_mut(&mut self, orientation: Orientation) -> &mut WallSet {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }

    pub fn contains(&self, wall: Wall) -> bool {
        self.get(wall.orientation).contains(wall.anchor)
    }

    /// Place a wall with no legality checks.
    pub fn insert(&mut self, wall: Wall) -> bool {
        self.get_mut(wall.orientation).insert(wall.anchor)
    }

    /// A copy with `wall` added.
    pub fn with(&self, wall: Wall) -> WallSets {
        let mut walls = *self;
        walls.insert(wall);
        walls
    }

    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Wall> + '_ {
        self.horizontal
            .iter()
            .map(|anchor| Wall {
                orientation: Orientation::Horizontal,
                anchor,
            })
            .chain(self.vertical.iter().map(|anchor| Wall {
                orientation: Orientation::Vertical,
                anchor,
            }))
    }

    /// Check if a wall blocks the step between two orthogonally adjacent cells.
    ///
    /// Each wall covers two edges, so an edge can be blocked from either of two
    /// anchors. Cells that are not adjacent are never blocked.
    pub fn is_wall_between(&self, from: Cell, to: Cell) -> bool {
        let (fc, fr) = (from.col as i16, from.row as i16);
        let (tc, tr) = (to.col as i16, to.row as i16);

        if (fc - tc).abs() + (fr - tr).abs() != 1 {
            return false;
        }

        if fc == tc {
            // Vertical step: horizontal walls on the boundary below the upper cell
            let row = fr.min(tr);
            self.horizontal.contains_at(fc, row) || self.horizontal.contains_at(fc - 1, row)
        } else {
            // Horizontal step: vertical walls on the boundary right of the left cell
            let col = fc.min(tc);
            self.vertical.contains_at(col, fr) || self.vertical.contains_at(col, fr - 1)
        }
    }
}
