#!/usr/bin/env rust
//! Self-play executable: pits two agents against each other and reports the results.
//!
//! Settings come from an optional YAML config; command-line flags override it.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use quoridor_engine::config::{load_config, PipelineConfig};
use quoridor_engine::game_runner::{play_games, MatchSummary};

#[derive(Parser, Debug)]
#[command(
    name = "selfplay",
    about = "Play Quoridor games between search and random agents",
    version
)]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Number of games to play
    #[arg(long)]
    games: Option<usize>,

    /// Time budget per move in milliseconds
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Deepest search iteration
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Log search progress (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(games) = args.games {
        config.self_play.games = games;
    }
    if let Some(budget_ms) = args.budget_ms {
        config.search.time_budget_ms = budget_ms;
    }
    if let Some(max_depth) = args.max_depth {
        config.search.max_depth = max_depth;
    }
    if args.seed.is_some() {
        config.self_play.seed = args.seed;
    }

    println!("Self-play configuration:");
    println!("  Games: {}", config.self_play.games);
    println!("  Max steps: {}", config.game.max_steps);
    println!("  Players: {:?} vs {:?}", config.players.one, config.players.two);
    println!(
        "  Search: depth {}, {} ms/move, wall radius {}",
        config.search.max_depth, config.search.time_budget_ms, config.search.wall_radius
    );

    let search = &config.search;
    let players = &config.players;
    let seed = config.self_play.seed;
    let results = play_games(config.self_play.games, config.game.max_steps, |index| {
        // Distinct seeds per game and per player slot
        let seed_for = |slot: u64| seed.map(|s| s.wrapping_add(2 * index as u64 + slot));
        Ok((
            players.one.build(search, seed_for(0)),
            players.two.build(search, seed_for(1)),
        ))
    })
    .context("Self-play failed")?;

    for (index, result) in results.iter().enumerate() {
        let winner = result
            .winner
            .map(|p| format!("player {}", p))
            .unwrap_or_else(|| "none (truncated)".to_string());
        info!("game {}: winner {}, {} turns", index + 1, winner, result.num_turns);
    }

    let summary = MatchSummary::from_results(&results);
    println!("\nResults over {} games:", summary.games);
    println!("  Player 1 wins: {}", summary.wins[0]);
    println!("  Player 2 wins: {}", summary.wins[1]);
    println!("  Truncated: {}", summary.truncated);
    println!("  Average turns: {:.1}", summary.average_turns());

    Ok(())
}
