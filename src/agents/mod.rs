//! Agent implementations for Quoridor self-play.
//!
//! All agents implement the [`ActionSelector`] trait.

use crate::actions::Action;
use crate::game_state::GameState;

pub mod minimax_agent;
pub mod random_agent;

pub use minimax_agent::MinimaxAgent;
pub use random_agent::RandomAgent;

/// Trait for agents that select actions given a game state.
pub trait ActionSelector {
    /// Short label for logs and reports.
    fn name(&self) -> &str;

    /// Choose an action for the side to move in `state`.
    ///
    /// The returned action must be legal; the game runner submits it to the
    /// executor and treats a rejection as an error.
    fn select_action(&mut self, state: &GameState) -> anyhow::Result<Action>;
}
