//! Rejection reasons for the rules engine and failures of the search engine.

use thiserror::Error;

use crate::grid::Wall;

/// How a proposed wall collides with walls already on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// Same orientation, at the anchor or one of its two collinear neighbours.
    Collinear,
    /// Perpendicular wall sharing the same anchor.
    Crossing,
}

/// Why the Executor refused a submitted action.
///
/// A rejected action never changes the game state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    #[error("({col}, {row}) is outside the board")]
    OutOfBounds { col: u8, row: u8 },
    #[error("wall {wall} overlaps an existing wall ({kind:?})")]
    WallOverlap { wall: Wall, kind: OverlapKind },
    #[error("player {player} has no walls left")]
    WallExhausted { player: u8 },
    #[error("({col}, {row}) is not a legal destination")]
    NotAValidDestination { col: u8, row: u8 },
    #[error("wall {wall} would cut a pawn off from its goal row")]
    PathBlocked { wall: Wall },
    #[error("the game is over")]
    GameOver,
    /// A position handed to the executor that no legal game could reach.
    #[error("invalid position: {reason}")]
    InvalidPosition { reason: &'static str },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The side to move has no pawn move and no wall. Cannot happen while
    /// every pawn keeps a path to its goal row.
    #[error("no legal action for the side to move")]
    NoLegalAction,
    #[error("search worker stopped without producing a result")]
    WorkerLost,
}
