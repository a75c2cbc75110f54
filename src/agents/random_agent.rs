//! Random agent: picks a legal action uniformly at random.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::actions::{legal_actions, Action};
use crate::agents::ActionSelector;
use crate::game_state::GameState;

/// An agent that selects a random legal action, walls included.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible agent for tests and seeded self-play runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSelector for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(&mut self, state: &GameState) -> anyhow::Result<Action> {
        let actions = legal_actions(state);
        actions
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No valid actions available"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Player;
    use crate::grid::{Cell, WallSets};

    #[test]
    fn test_random_agent_picks_legal_action() {
        let mut agent = RandomAgent::with_seed(7);
        let state = GameState::new();
        let legal = legal_actions(&state);

        for _ in 0..50 {
            let action = agent.select_action(&state).unwrap();
            assert!(legal.contains(&action), "RandomAgent picked an illegal action {}", action);
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = GameState::new();
        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.select_action(&state).unwrap(), b.select_action(&state).unwrap());
        }
    }

    #[test]
    fn test_only_pawn_moves_without_walls() {
        let state = GameState::from_parts(
            [Cell::new(4, 8), Cell::new(4, 0)],
            WallSets::new(),
            [0, 10],
            Player::One,
        );
        let mut agent = RandomAgent::with_seed(1);
        for _ in 0..20 {
            assert!(!agent.select_action(&state).unwrap().is_wall());
        }
    }
}
