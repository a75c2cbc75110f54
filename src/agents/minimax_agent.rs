//! Agent backed by the alpha-beta search.

use anyhow::Context;
use log::debug;

use crate::actions::Action;
use crate::agents::ActionSelector;
use crate::game_state::GameState;
use crate::minimax::{search, SearchConfig, SearchResult};

pub struct MinimaxAgent {
    config: SearchConfig,
    last: Option<SearchResult>,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        Self { config, last: None }
    }

    /// Details of the most recent search, if any.
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last.as_ref()
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl ActionSelector for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_action(&mut self, state: &GameState) -> anyhow::Result<Action> {
        let result = search(state, &self.config)
            .with_context(|| format!("Search failed for player {}", state.current_player()))?;
        debug!(
            "player {} chose {} (score {:.2}, depth {}, {:?})",
            state.current_player(),
            result.action,
            result.score,
            result.depth,
            result.stop
        );
        self.last = Some(result);
        Ok(result.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Player;
    use crate::grid::{Cell, WallSets};

    #[test]
    fn test_minimax_agent_wins_when_it_can() {
        let state = GameState::from_parts(
            [Cell::new(3, 1), Cell::new(8, 4)],
            WallSets::new(),
            [10, 10],
            Player::One,
        );
        let mut agent = MinimaxAgent::new(SearchConfig {
            max_depth: 2,
            wall_radius: 1,
            time_budget_ms: 30_000,
            ..SearchConfig::default()
        });
        assert_eq!(agent.select_action(&state).unwrap(), Action::Move(Cell::new(3, 0)));
        assert_eq!(agent.last_result().map(|r| r.depth), Some(1));
    }
}
