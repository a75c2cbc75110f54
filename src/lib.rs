//! Quoridor rules engine and alpha-beta search.
//!
//! [`game_mechanics::Game`] owns the canonical position and is the only thing
//! that changes it. Everything else (move generation, path checks, the
//! search) works on [`GameState`] copies.

pub mod actions;
pub mod agents;
#[cfg(feature = "binary")]
pub mod config;
pub mod error;
pub mod game_mechanics;
pub mod game_runner;
pub mod game_state;
pub mod grid;
pub mod minimax;
pub mod pathfinding;
pub mod search_task;
pub mod validation;

pub use actions::Action;
pub use error::{OverlapKind, RuleError, SearchError};
pub use game_mechanics::{Game, GameStatus, MoveOutcome};
pub use game_state::{GameState, Player};
pub use grid::{Cell, Orientation, Wall, WallSet, WallSets};
pub use minimax::{search, search_until, SearchConfig, SearchResult, StopReason};
pub use search_task::SearchTask;
