//! Configuration for self-play sessions.
//!
//! Every section is optional and falls back to its defaults; sections this
//! crate doesn't know about are silently ignored.
//!
//! This module is only available behind the `binary` feature flag.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::agents::{ActionSelector, MinimaxAgent, RandomAgent};
use crate::minimax::SearchConfig;

/// Top-level config.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub game: GameConfig,

    #[serde(default)]
    pub players: PlayersConfig,

    #[serde(default)]
    pub self_play: SelfPlayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Turns before a game is stopped with no winner.
    pub max_steps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { max_steps: 200 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Minimax,
    Random,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub one: AgentKind,
    pub two: AgentKind,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            one: AgentKind::Minimax,
            two: AgentKind::Minimax,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub games: usize,
    /// Base seed for random agents; each game and player slot derives its own.
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self { games: 1, seed: None }
    }
}

impl AgentKind {
    /// Build an agent of this kind. `seed` only affects random agents.
    pub fn build(self, search: &SearchConfig, seed: Option<u64>) -> Box<dyn ActionSelector> {
        match self {
            AgentKind::Minimax => Box::new(MinimaxAgent::new(search.clone())),
            AgentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::with_seed(seed)),
                None => Box::new(RandomAgent::new()),
            },
        }
    }
}

/// Load a `PipelineConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: PipelineConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    Ok(config)
}
