//! Position evaluation and the iterative-deepening alpha-beta search.
//!
//! Scores are always from player 2's point of view: player 2 maximizes,
//! player 1 minimizes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::debug;
use serde::Deserialize;

use crate::actions::{candidate_wall_actions, valid_wall_actions, Action};
use crate::error::SearchError;
use crate::game_state::{GameState, Player};

pub const WIN_SCORE: f32 = 1e6;

/// Nodes between two checks of the deadline and the cancel flag.
const CHECK_INTERVAL: u64 = 256;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest iteration the search will attempt.
    pub max_depth: u32,
    /// Wall-clock budget per search, used by [`search`].
    pub time_budget_ms: u64,
    /// Walls are only tried with anchors within this many cells of the
    /// opponent's pawn. 0 disables walls in the search.
    pub wall_radius: u8,
    /// Weight of the wall-supply difference in [`evaluate`].
    pub wall_weight: f32,
    /// Give up after visiting this many nodes.
    pub node_budget: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            time_budget_ms: 1000,
            wall_radius: 2,
            wall_weight: 0.25,
            node_budget: None,
        }
    }
}

impl SearchConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

/// Why iterative deepening stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every depth up to `max_depth` completed.
    MaxDepth,
    /// A forced win or loss was found; deeper search can't change the move.
    DecisiveScore,
    /// The deadline passed. The move comes from the last completed depth.
    Timeout,
    Cancelled,
    NodeBudget,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub action: Action,
    pub score: f32,
    /// Deepest fully completed depth, 0 if the fallback move was used.
    pub depth: u32,
    pub nodes: u64,
    pub stop: StopReason,
}

/// Static evaluation of a position.
///
/// Positive favours player 2. A pawn on its goal row, or an opponent cut off
/// from theirs, scores `±WIN_SCORE`; otherwise the score is the difference in
/// path lengths plus `wall_weight` times the difference in walls left.
pub fn evaluate(state: &GameState, wall_weight: f32) -> f32 {
    if state.check_win(Player::Two) {
        return WIN_SCORE;
    }
    if state.check_win(Player::One) {
        return -WIN_SCORE;
    }

    match (
        state.distance_to_goal(Player::One),
        state.distance_to_goal(Player::Two),
    ) {
        (Some(d1), Some(d2)) => {
            let walls1 = state.walls_remaining(Player::One) as f32;
            let walls2 = state.walls_remaining(Player::Two) as f32;
            d1 as f32 - d2 as f32 + wall_weight * (walls2 - walls1)
        }
        (None, Some(_)) => WIN_SCORE,
        (Some(_), None) => -WIN_SCORE,
        (None, None) => 0.0,
    }
}

/// Score of a node where the search stops expanding. Wins found with more
/// depth left score further from zero, so the search prefers quicker wins.
pub(crate) fn leaf_score(state: &GameState, depth_remaining: u32, wall_weight: f32) -> f32 {
    match state.winner() {
        Some(Player::Two) => WIN_SCORE + depth_remaining as f32,
        Some(Player::One) => -(WIN_SCORE + depth_remaining as f32),
        None => evaluate(state, wall_weight),
    }
}

pub fn is_decisive(score: f32) -> bool {
    score.abs() >= WIN_SCORE
}

/// Actions to search from `state`: the hint first if present, then pawn moves
/// closest to the goal row, then candidate walls near the opponent.
pub(crate) fn ordered_actions(
    state: &GameState,
    hint: Option<Action>,
    wall_radius: u8,
) -> Vec<Action> {
    let mover = state.current_player();
    let goal = mover.goal_row();

    let mut moves = state.valid_pawn_moves();
    moves.sort_by_key(|cell| cell.row.abs_diff(goal));

    let mut actions: Vec<Action> = moves.into_iter().map(Action::Move).collect();
    actions.extend(
        candidate_wall_actions(state, wall_radius)
            .into_iter()
            .map(Action::PlaceWall),
    );

    if let Some(hint) = hint {
        if let Some(pos) = actions.iter().position(|&a| a == hint) {
            let hinted = actions.remove(pos);
            actions.insert(0, hinted);
        }
    }
    actions
}

/// The position after `action`, or `None` if it's a wall that would cut a
/// pawn off from its goal. Works on a copy; `state` is never touched.
pub(crate) fn child_state(state: &GameState, action: Action) -> Option<GameState> {
    let child = state.with_action(action);
    if action.is_wall() && !child.all_paths_open() {
        return None;
    }
    Some(child)
}

/// Score a child the search refused to enter: as bad as possible for the proposer.
#[inline]
fn pruned_score(maximizing: bool) -> f32 {
    if maximizing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    }
}

struct Searcher<'a> {
    config: &'a SearchConfig,
    deadline: Option<Instant>,
    cancel: Option<&'a AtomicBool>,
    nodes: u64,
    stop: Option<StopReason>,
}

impl<'a> Searcher<'a> {
    fn new(
        config: &'a SearchConfig,
        deadline: Option<Instant>,
        cancel: Option<&'a AtomicBool>,
    ) -> Self {
        Self {
            config,
            deadline,
            cancel,
            nodes: 0,
            stop: None,
        }
    }

    fn check_interrupts(&mut self) -> Option<StopReason> {
        if let Some(cancel) = self.cancel {
            if cancel.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(StopReason::Timeout);
            }
        }
        None
    }

    /// Count a node and decide whether the current depth must be abandoned.
    fn tick(&mut self) -> bool {
        if self.stop.is_some() {
            return true;
        }
        self.nodes += 1;
        if let Some(budget) = self.config.node_budget {
            if self.nodes >= budget {
                self.stop = Some(StopReason::NodeBudget);
                return true;
            }
        }
        if self.nodes % CHECK_INTERVAL == 0 {
            self.stop = self.check_interrupts();
        }
        self.stop.is_some()
    }

    /// Fail-soft alpha-beta. The returned value is meaningless once `stop` is set.
    fn alpha_beta(&mut self, state: &GameState, depth: u32, mut alpha: f32, mut beta: f32) -> f32 {
        if self.tick() {
            return 0.0;
        }
        if depth == 0 || state.is_terminal() {
            return leaf_score(state, depth, self.config.wall_weight);
        }

        let actions = ordered_actions(state, None, self.config.wall_radius);
        if actions.is_empty() {
            return leaf_score(state, depth, self.config.wall_weight);
        }

        let maximizing = state.current_player() == Player::Two;
        let mut best = pruned_score(maximizing);

        for action in actions {
            let score = match child_state(state, action) {
                Some(child) => self.alpha_beta(&child, depth - 1, alpha, beta),
                None => pruned_score(maximizing),
            };
            if self.stop.is_some() {
                return 0.0;
            }

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Search one depth from the root. `None` if the depth was interrupted.
    fn search_root(
        &mut self,
        state: &GameState,
        depth: u32,
        hint: Option<Action>,
    ) -> Option<(Action, f32)> {
        let maximizing = state.current_player() == Player::Two;
        let mut alpha = f32::NEG_INFINITY;
        let mut beta = f32::INFINITY;
        let mut best: Option<(Action, f32)> = None;

        for action in ordered_actions(state, hint, self.config.wall_radius) {
            let score = match child_state(state, action) {
                Some(child) => self.alpha_beta(&child, depth - 1, alpha, beta),
                None => continue,
            };
            if self.stop.is_some() {
                return None;
            }

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((action, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }
        best
    }
}

/// First legal pawn move, or any legal wall if the pawn is stuck.
fn fallback_action(state: &GameState) -> Result<Action, SearchError> {
    if let Some(&cell) = state.valid_pawn_moves().first() {
        return Ok(Action::Move(cell));
    }
    valid_wall_actions(state)
        .first()
        .map(|&wall| Action::PlaceWall(wall))
        .ok_or(SearchError::NoLegalAction)
}

/// Search `state` within the configured time budget.
pub fn search(state: &GameState, config: &SearchConfig) -> Result<SearchResult, SearchError> {
    let deadline = Instant::now() + config.time_budget();
    search_until(state, Some(deadline), config, None)
}

/// Iterative deepening from depth 1 up to `config.max_depth`.
///
/// Stops at the deadline, when `cancel` is raised, when the node budget runs
/// out, or once a forced win or loss is found. An interrupted depth is thrown
/// away and the move from the last completed depth is returned; if no depth
/// completed, the first legal pawn move is returned with its static score.
pub fn search_until(
    state: &GameState,
    deadline: Option<Instant>,
    config: &SearchConfig,
    cancel: Option<&AtomicBool>,
) -> Result<SearchResult, SearchError> {
    let fallback = fallback_action(state)?;
    let mut searcher = Searcher::new(config, deadline, cancel);

    let mut best: Option<(Action, f32, u32)> = None;
    let mut hint = None;
    let mut stop = StopReason::MaxDepth;

    if state.is_terminal() {
        stop = StopReason::DecisiveScore;
    } else {
        for depth in 1..=config.max_depth {
            if let Some(reason) = searcher.check_interrupts() {
                stop = reason;
                break;
            }

            let Some((action, score)) = searcher.search_root(state, depth, hint) else {
                stop = searcher.stop.unwrap_or(StopReason::MaxDepth);
                break;
            };

            debug!(
                "depth {} complete: best {} score {:.2} nodes {}",
                depth, action, score, searcher.nodes
            );
            best = Some((action, score, depth));
            hint = Some(action);

            if is_decisive(score) {
                stop = StopReason::DecisiveScore;
                break;
            }
        }
    }

    let result = match best {
        Some((action, score, depth)) => SearchResult {
            action,
            score,
            depth,
            nodes: searcher.nodes,
            stop,
        },
        None => {
            debug!("no depth completed ({:?}), falling back to {}", stop, fallback);
            SearchResult {
                action: fallback,
                score: evaluate(state, config.wall_weight),
                depth: 0,
                nodes: searcher.nodes,
                stop,
            }
        }
    };
    Ok(result)
}

/// Exact alpha-beta value of `state` searched to `depth`, with no time limit.
pub fn alpha_beta_score(state: &GameState, depth: u32, config: &SearchConfig) -> f32 {
    let unlimited = SearchConfig {
        node_budget: None,
        ..config.clone()
    };
    let mut searcher = Searcher::new(&unlimited, None, None);
    searcher.alpha_beta(state, depth, f32::NEG_INFINITY, f32::INFINITY)
}
