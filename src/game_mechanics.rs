//! The move executor: the only code that changes a game's canonical state.
//!
//! Every submission is validated in full before anything is written, so a
//! rejected action leaves the state exactly as it was.

use log::debug;

use crate::actions::Action;
use crate::error::RuleError;
use crate::game_state::{GameState, Player};
use crate::grid::{Cell, Wall, WallSets};
use crate::validation::{check_move_action, check_wall_action};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
}

/// What happened after an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The turn passed to `next`.
    Continue { next: Player },
    /// The mover reached their goal row. The game is over.
    Won(Player),
}

/// A game in progress, owning the canonical [`GameState`].
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Start from an arbitrary position, e.g. a puzzle or a test setup.
    ///
    /// Both pawns must be on distinct board cells and each must still have a
    /// path to its goal row.
    pub fn from_state(state: GameState) -> Result<Self, RuleError> {
        for player in Player::BOTH {
            let cell = state.position(player);
            if !cell.is_on_board() {
                return Err(RuleError::OutOfBounds {
                    col: cell.col,
                    row: cell.row,
                });
            }
        }
        if state.position(Player::One) == state.position(Player::Two) {
            return Err(RuleError::InvalidPosition {
                reason: "both pawns on the same cell",
            });
        }
        if !state.all_paths_open() {
            return Err(RuleError::InvalidPosition {
                reason: "a pawn has no path to its goal row",
            });
        }

        let status = match state.winner() {
            Some(player) => GameStatus::Won(player),
            None => GameStatus::InProgress,
        };
        Ok(Self { state, status })
    }

    /// Back to the initial position with player 1 to move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A copy of the current position for the search engine or other readers.
    pub fn snapshot(&self) -> GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            GameStatus::InProgress => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn position(&self, player: Player) -> Cell {
        self.state.position(player)
    }

    pub fn walls(&self) -> &WallSets {
        self.state.walls()
    }

    pub fn walls_remaining(&self, player: Player) -> u8 {
        self.state.walls_remaining(player)
    }

    /// Legal pawn destinations for the side to move; empty once the game is over.
    pub fn valid_moves(&self) -> Vec<Cell> {
        if self.is_over() {
            return Vec::new();
        }
        self.state.valid_pawn_moves()
    }

    /// Validate and apply an action for the side to move.
    pub fn apply(&mut self, action: Action) -> Result<MoveOutcome, RuleError> {
        match action {
            Action::Move(dest) => self.move_pawn(dest),
            Action::PlaceWall(wall) => self.place_wall(wall),
        }
    }

    pub fn move_pawn(&mut self, dest: Cell) -> Result<MoveOutcome, RuleError> {
        self.ensure_in_progress()?;
        let mover = self.state.current_player();
        if let Err(err) = check_move_action(&self.state, dest) {
            debug!("player {} move to {} rejected: {}", mover, dest, err);
            return Err(err);
        }

        self.state.positions[mover.index()] = dest;
        if self.state.check_win(mover) {
            self.status = GameStatus::Won(mover);
            return Ok(MoveOutcome::Won(mover));
        }

        self.state.current_player = mover.opponent();
        Ok(MoveOutcome::Continue {
            next: self.state.current_player,
        })
    }

    pub fn place_wall(&mut self, wall: Wall) -> Result<MoveOutcome, RuleError> {
        self.ensure_in_progress()?;
        let mover = self.state.current_player();
        let walls = match check_wall_action(&self.state, wall) {
            Ok(walls) => walls,
            Err(err) => {
                debug!("player {} wall {} rejected: {}", mover, wall, err);
                return Err(err);
            }
        };

        // Everything below is infallible, so the commit is all-or-nothing
        self.state.walls = walls;
        self.state.walls_remaining[mover.index()] -= 1;
        self.state.current_player = mover.opponent();
        Ok(MoveOutcome::Continue {
            next: self.state.current_player,
        })
    }

    fn ensure_in_progress(&self) -> Result<(), RuleError> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            GameStatus::Won(_) => Err(RuleError::GameOver),
        }
    }
}
