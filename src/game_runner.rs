//! Core game loop for self-play.
//!
//! Agents are abstracted behind the [`ActionSelector`] trait so the runner can
//! be tested with scripted agents. Every action goes through the executor, so
//! an agent proposing an illegal action ends the game with an error.

use anyhow::Context;
use log::info;
use rayon::prelude::*;

use crate::actions::Action;
use crate::agents::ActionSelector;
use crate::game_mechanics::{Game, MoveOutcome};
use crate::game_state::Player;

/// Result of a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// `Some(player)` if that player won, `None` if truncated.
    pub winner: Option<Player>,
    /// Total number of turns played.
    pub num_turns: u32,
    /// Every accepted action, in order, starting with player 1's.
    pub actions: Vec<Action>,
}

/// Win counts over a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub games: usize,
    pub wins: [usize; 2],
    pub truncated: usize,
    pub total_turns: u64,
}

impl MatchSummary {
    pub fn from_results(results: &[GameResult]) -> Self {
        let mut summary = MatchSummary {
            games: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.winner {
                Some(player) => summary.wins[player.index()] += 1,
                None => summary.truncated += 1,
            }
            summary.total_turns += result.num_turns as u64;
        }
        summary
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }
}

/// Play one game from the initial position. Player 1 moves first.
///
/// The game is truncated with no winner after `max_steps` turns.
pub fn play_game(
    player_one: &mut dyn ActionSelector,
    player_two: &mut dyn ActionSelector,
    max_steps: u32,
) -> anyhow::Result<GameResult> {
    let mut game = Game::new();
    let mut actions = Vec::new();

    for step in 0..max_steps {
        let mover = game.current_player();
        let agent: &mut dyn ActionSelector = match mover {
            Player::One => &mut *player_one,
            Player::Two => &mut *player_two,
        };

        let action = agent
            .select_action(game.state())
            .with_context(|| format!("Agent {} failed on turn {}", agent.name(), step + 1))?;
        let outcome = game.apply(action).with_context(|| {
            format!(
                "Agent {} (player {}) proposed illegal action {} on turn {}",
                agent.name(),
                mover,
                action,
                step + 1
            )
        })?;
        actions.push(action);

        if let MoveOutcome::Won(winner) = outcome {
            info!(
                "player {} ({}) won after {} turns",
                winner,
                agent.name(),
                step + 1
            );
            return Ok(GameResult {
                winner: Some(winner),
                num_turns: step + 1,
                actions,
            });
        }
    }

    info!("game truncated after {} turns", max_steps);
    Ok(GameResult {
        winner: None,
        num_turns: max_steps,
        actions,
    })
}

/// Agents for one game: player 1's, then player 2's.
pub type AgentPair = (Box<dyn ActionSelector>, Box<dyn ActionSelector>);

/// Play `num_games` independent games in parallel.
///
/// `make_agents` is called with the game index and builds fresh agents for
/// that game, so no agent state is shared between games.
pub fn play_games<F>(
    num_games: usize,
    max_steps: u32,
    make_agents: F,
) -> anyhow::Result<Vec<GameResult>>
where
    F: Fn(usize) -> anyhow::Result<AgentPair> + Sync,
{
    (0..num_games)
        .into_par_iter()
        .map(|index| {
            let (mut one, mut two) = make_agents(index)?;
            play_game(one.as_mut(), two.as_mut(), max_steps)
                .with_context(|| format!("Game {} failed", index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RandomAgent;
    use crate::game_state::GameState;
    use crate::grid::{Cell, Wall};

    /// Always steps onto the cell with the shortest remaining path.
    struct ShortestPathAgent;

    impl ActionSelector for ShortestPathAgent {
        fn name(&self) -> &str {
            "shortest-path"
        }

        fn select_action(&mut self, state: &GameState) -> anyhow::Result<Action> {
            let mover = state.current_player();
            state
                .valid_pawn_moves()
                .into_iter()
                .min_by_key(|&cell| {
                    state
                        .with_action(Action::Move(cell))
                        .distance_to_goal(mover)
                        .unwrap_or(u32::MAX)
                })
                .map(Action::Move)
                .ok_or_else(|| anyhow::anyhow!("no pawn move"))
        }
    }

    /// Keeps proposing the same wall, which is illegal the second time.
    struct StubbornWallAgent;

    impl ActionSelector for StubbornWallAgent {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn select_action(&mut self, _state: &GameState) -> anyhow::Result<Action> {
            Ok(Action::PlaceWall(Wall::horizontal(0, 0)))
        }
    }

    fn replay(actions: &[Action]) -> Game {
        let mut game = Game::new();
        for &action in actions {
            game.apply(action).unwrap();
        }
        game
    }

    #[test]
    fn test_play_game_completes() {
        let result = play_game(&mut ShortestPathAgent, &mut ShortestPathAgent, 200).unwrap();
        assert!(result.winner.is_some());
        assert!(result.num_turns <= 30);
        assert_eq!(result.actions.len() as u32, result.num_turns);
    }

    #[test]
    fn test_actions_replay_to_same_result() {
        let mut random = RandomAgent::with_seed(3);
        let result = play_game(&mut random, &mut ShortestPathAgent, 300).unwrap();
        let game = replay(&result.actions);
        assert_eq!(game.winner(), result.winner);
    }

    #[test]
    fn test_play_game_truncation() {
        let mut one = RandomAgent::with_seed(1);
        let mut two = RandomAgent::with_seed(2);
        let result = play_game(&mut one, &mut two, 3).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.num_turns, 3);
        assert_eq!(result.actions.len(), 3);
    }

    #[test]
    fn test_illegal_action_is_an_error() {
        let result = play_game(&mut StubbornWallAgent, &mut StubbornWallAgent, 10);
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("illegal action"));
    }

    #[test]
    fn test_play_games_in_parallel() {
        let results = play_games(4, 200, |index| {
            Ok((
                Box::new(RandomAgent::with_seed(index as u64)) as Box<dyn ActionSelector>,
                Box::new(ShortestPathAgent) as Box<dyn ActionSelector>,
            ))
        })
        .unwrap();

        assert_eq!(results.len(), 4);
        for result in &results {
            let game = replay(&result.actions);
            assert_eq!(game.winner(), result.winner);
        }

        let summary = MatchSummary::from_results(&results);
        assert_eq!(summary.games, 4);
        assert_eq!(summary.wins[0] + summary.wins[1] + summary.truncated, 4);
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            GameResult {
                winner: Some(Player::Two),
                num_turns: 10,
                actions: vec![],
            },
            GameResult {
                winner: None,
                num_turns: 20,
                actions: vec![Action::Move(Cell::new(4, 7))],
            },
        ];
        let summary = MatchSummary::from_results(&results);
        assert_eq!(summary.wins, [0, 1]);
        assert_eq!(summary.truncated, 1);
        assert_eq!(summary.average_turns(), 15.0);
    }
}
