//! Farkle command-line tool.
//!
//! Score a roll, or run automated games and report the standings.

#![warn(missing_docs)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use farkle_engine::core::{GameSettings, PlayerId, PlayerMap};
use farkle_engine::dice::DieValue;
use farkle_engine::profile::{record_game_results, PlayerProfile, ProfileRegistry};
use farkle_engine::rules::{FarkleRules, RulesEngine};
use farkle_engine::scoring::{score_breakdown, ScoringCombo, ScoringPattern};
use farkle_engine::strategy::{play_game, Strategy, ThresholdStrategy};
use serde_json::json;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

/// Actions allowed per simulated game before it is abandoned.
const MAX_ACTIONS_PER_GAME: u32 = 100_000;

/// Farkle - dice scoring and game simulation
#[derive(Parser, Debug)]
#[command(name = "farkle")]
#[command(about = "Score Farkle rolls and simulate games", long_about = None)]
#[command(version)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Score a roll of one to six dice
    Score {
        /// Face values, 1-6
        #[arg(required = true, num_args = 1..=6)]
        faces: Vec<u8>,

        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Play automated games and report the standings
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed of the first game; game `n` uses `seed + n`
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Players per game (overrides the settings file)
        #[arg(short, long)]
        players: Option<usize>,

        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Bank once the turn is worth this much
        #[arg(long, default_value = "350")]
        bank_at: u32,

        /// Bottom feed stakes of at least this much (defaults to --bank-at)
        #[arg(long)]
        bottom_feed_at: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Score { faces, config, json } => run_score(&faces, config, json),
        Command::Simulate {
            games,
            seed,
            players,
            config,
            bank_at,
            bottom_feed_at,
            json,
        } => {
            let strategy = ThresholdStrategy::new(bank_at)
                .with_bottom_feed_at(bottom_feed_at.unwrap_or(bank_at));
            run_simulate(games, seed, players, config, strategy, json)
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<GameSettings> {
    match path {
        Some(path) => GameSettings::from_file(&path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(GameSettings::default()),
    }
}

/// Print the score of a single roll.
#[instrument]
fn run_score(faces: &[u8], config: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = load_settings(config)?;
    let values = faces
        .iter()
        .map(|&face| DieValue::try_from(face))
        .collect::<Result<Vec<_>, _>>()?;

    let breakdown = score_breakdown(&values, &settings);

    if json {
        let report = json!({
            "faces": faces,
            "score": breakdown.total(),
            "dice_used": breakdown.dice_used(),
            "farkle": breakdown.is_farkle(),
            "combos": breakdown.combos.iter().map(combo_report).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let shown: Vec<String> = values.iter().map(ToString::to_string).collect();
        println!("Roll: {}", shown.join(" "));
        println!("{}", breakdown);
    }
    Ok(())
}

fn combo_report(combo: &ScoringCombo) -> serde_json::Value {
    let description = match combo.pattern {
        ScoringPattern::Combo(kind) => Some(kind.description()),
        ScoringPattern::OfAKind { .. } | ScoringPattern::Singles { .. } => None,
    };
    json!({
        "pattern": combo.to_string(),
        "points": combo.points,
        "dice_used": combo.dice_used(),
        "description": description,
    })
}

/// Play `games` games with every seat using `strategy`.
#[instrument(skip(strategy))]
fn run_simulate(
    games: u32,
    seed: u64,
    players: Option<usize>,
    config: Option<PathBuf>,
    strategy: ThresholdStrategy,
    json: bool,
) -> Result<()> {
    let mut settings = load_settings(config)?;
    if let Some(count) = players {
        settings = settings.with_player_count(count);
    }
    let rules = FarkleRules::new(settings)?;
    let player_count = rules.settings().player_count;

    let seating = PlayerMap::new(player_count, |p: PlayerId| format!("seat-{}", p.index() + 1));
    let mut registry = ProfileRegistry::new();
    for (player, id) in seating.iter() {
        registry.register(PlayerProfile::new(id.clone(), player.to_string()));
    }

    let strategies: [&dyn Strategy<FarkleRules>; 1] = [&strategy];
    let mut unfinished = 0u32;
    let mut total_turns = 0u64;

    info!(games, seed, player_count, bank_at = strategy.bank_at, "Simulating");
    for game in 0..games {
        let mut state = rules.new_state(seed.wrapping_add(u64::from(game)));
        match play_game(&rules, &mut state, &strategies, MAX_ACTIONS_PER_GAME)? {
            Some(_) => {
                total_turns += u64::from(state.public.turn_number);
                record_game_results(&mut registry, &seating, &state.public);
            }
            None => {
                warn!(game, "Game did not finish");
                unfinished += 1;
            }
        }
    }

    let finished = games - unfinished;
    let average_turns = if finished == 0 {
        0.0
    } else {
        total_turns as f64 / f64::from(finished)
    };
    let standings = registry.leaderboard();

    if json {
        let report = json!({
            "games": games,
            "finished": finished,
            "average_turns": average_turns,
            "settings": rules.settings(),
            "players": standings.iter().map(|p| json!({
                "player_id": p.player_id,
                "player_name": p.player_name,
                "games_won": p.games_won,
                "win_rate": p.win_rate(),
                "average_score": p.average_score(),
                "high_score": p.high_score,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} games ({} finished), {:.1} turns per game",
            games, finished, average_turns
        );
        for profile in standings {
            println!(
                "{:<10} wins {:>5} ({:>5.1}%)  avg {:>8.1}  best {:>6}",
                profile.player_name,
                profile.games_won,
                profile.win_rate() * 100.0,
                profile.average_score(),
                profile.high_score
            );
        }
    }
    Ok(())
}
