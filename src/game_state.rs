use std::fmt;

use crate::actions::{valid_pawn_moves, Action};
use crate::grid::{Cell, WallSets, BOARD_SIZE, MAX_WALLS};
use crate::pathfinding::{distance_to_row, path_exists};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// 1 or 2, as players are numbered on the board.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Player 1 starts on the bottom row and races to row 0, player 2 the reverse.
    pub fn goal_row(self) -> u8 {
        match self {
            Player::One => 0,
            Player::Two => BOARD_SIZE - 1,
        }
    }

    pub fn start_cell(self) -> Cell {
        match self {
            Player::One => Cell::new(BOARD_SIZE / 2, BOARD_SIZE - 1),
            Player::Two => Cell::new(BOARD_SIZE / 2, 0),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A complete position: pawns, walls, wall supply and side to move.
///
/// `GameState` is a plain `Copy` value. The search engine and other probes
/// take it by value and work on their own copy; only
/// [`Game`](crate::game_mechanics::Game) owns the canonical instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub(crate) positions: [Cell; 2],
    pub(crate) walls: WallSets,
    pub(crate) walls_remaining: [u8; 2],
    pub(crate) current_player: Player,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, player 1 to move.
    pub fn new() -> Self {
        Self {
            positions: [Player::One.start_cell(), Player::Two.start_cell()],
            walls: WallSets::new(),
            walls_remaining: [MAX_WALLS, MAX_WALLS],
            current_player: Player::One,
        }
    }

    /// Build an arbitrary position. No legality checks are made.
    pub fn from_parts(
        positions: [Cell; 2],
        walls: WallSets,
        walls_remaining: [u8; 2],
        current_player: Player,
    ) -> Self {
        Self {
            positions,
            walls,
            walls_remaining: walls_remaining.map(|w| w.min(MAX_WALLS)),
            current_player,
        }
    }

    #[inline]
    pub fn position(&self, player: Player) -> Cell {
        self.positions[player.index()]
    }

    #[inline]
    pub fn walls(&self) -> &WallSets {
        &self.walls
    }

    #[inline]
    pub fn walls_remaining(&self, player: Player) -> u8 {
        self.walls_remaining[player.index()]
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Check if a player has won by reaching their goal row.
    pub fn check_win(&self, player: Player) -> bool {
        self.position(player).row == player.goal_row()
    }

    pub fn winner(&self) -> Option<Player> {
        Player::BOTH.into_iter().find(|&p| self.check_win(p))
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Shortest pawn-move distance to the goal row, `None` if cut off.
    pub fn distance_to_goal(&self, player: Player) -> Option<u32> {
        distance_to_row(
            self.position(player),
            player.goal_row(),
            self.position(player.opponent()),
            &self.walls,
        )
    }

    pub fn has_path_to_goal(&self, player: Player) -> bool {
        path_exists(
            self.position(player),
            player.goal_row(),
            self.position(player.opponent()),
            &self.walls,
        )
    }

    /// Both pawns can still reach their goal rows.
    pub fn all_paths_open(&self) -> bool {
        Player::BOTH.into_iter().all(|p| self.has_path_to_goal(p))
    }

    /// Legal pawn destinations for the side to move.
    pub fn valid_pawn_moves(&self) -> Vec<Cell> {
        let mover = self.current_player;
        valid_pawn_moves(
            self.position(mover),
            self.position(mover.opponent()),
            &self.walls,
        )
    }

    /// Apply an action for the side to move and pass the turn.
    ///
    /// No validation happens here: callers either validated already or are
    /// working on a throwaway copy.
    pub fn apply_action(&mut self, action: Action) {
        let mover = self.current_player;
        match action {
            Action::Move(dest) => {
                self.positions[mover.index()] = dest;
            }
            Action::PlaceWall(wall) => {
                self.walls.insert(wall);
                let remaining = &mut self.walls_remaining[mover.index()];
                *remaining = remaining.saturating_sub(1);
            }
        }
        self.current_player = mover.opponent();
    }

    /// A copy of this position with `action` applied.
    pub fn with_action(&self, action: Action) -> GameState {
        let mut next = *self;
        next.apply_action(action);
        next
    }
}

impl fmt::Display for GameState {
    /// Text board: `1`/`2` for pawns, `|` and `-` for wall segments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "to move: {}  walls: [{}, {}]",
            self.current_player,
            self.walls_remaining(Player::One),
            self.walls_remaining(Player::Two)
        )?;
        for row in 0..BOARD_SIZE {
            let mut cells = String::new();
            let mut edges = String::new();
            for col in 0..BOARD_SIZE {
                let cell = Cell::new(col, row);
                let glyph = if cell == self.position(Player::One) {
                    '1'
                } else if cell == self.position(Player::Two) {
                    '2'
                } else {
                    '.'
                };
                cells.push(glyph);
                if col + 1 < BOARD_SIZE {
                    let right = Cell::new(col + 1, row);
                    cells.push(if self.walls.is_wall_between(cell, right) { '|' } else { ' ' });
                }
                if row + 1 < BOARD_SIZE {
                    let below = Cell::new(col, row + 1);
                    edges.push(if self.walls.is_wall_between(cell, below) { '-' } else { ' ' });
                    if col + 1 < BOARD_SIZE {
                        edges.push(' ');
                    }
                }
            }
            writeln!(f, "{}", cells)?;
            if row + 1 < BOARD_SIZE {
                writeln!(f, "{}", edges.trim_end())?;
            }
        }
        Ok(())
    }
}
