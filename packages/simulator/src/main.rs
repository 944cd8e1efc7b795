//! Associations simulator - plays whole sessions with a bot host on a
//! virtual clock and writes one result per game.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use output::OutputWriter;
use simulator::{SimConfig, Simulator};
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "associations-simulator")]
#[command(about = "Fast in-memory simulation of Associations sessions")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Number of teams
    #[arg(long, default_value = "2")]
    teams: usize,

    /// Players per team
    #[arg(long, default_value = "3")]
    players: usize,

    /// Words in the pool
    #[arg(long, default_value = "30")]
    words: usize,

    /// Chance that a word is guessed after thinking (0.0 - 1.0)
    #[arg(long, default_value = "0.7")]
    guess_rate: f64,

    /// Shortest thinking time per word, in seconds
    #[arg(long, default_value = "2")]
    think_min: u64,

    /// Longest thinking time per word, in seconds
    #[arg(long, default_value = "8")]
    think_max: u64,

    /// Stop a game after this many turns
    #[arg(long, default_value = "10000")]
    max_turns: u32,

    /// Base seed; game N uses seed + N. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !(0.0..=1.0).contains(&args.guess_rate) {
        return Err(format!("--guess-rate must be within 0..=1, got {}", args.guess_rate).into());
    }
    if args.think_min == 0 || args.think_min > args.think_max {
        return Err("--think-min must be at least 1 and not above --think-max".into());
    }

    let config = SimConfig {
        teams: args.teams,
        players_per_team: args.players,
        words: args.words,
        guess_rate: args.guess_rate,
        think_min: args.think_min,
        think_max: args.think_max,
        max_turns: args.max_turns,
    };

    let mut writer = OutputWriter::new(args.output.as_deref(), args.format)?;
    let start = Instant::now();
    let mut errors = 0;

    for game in 1..=args.games {
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game)),
            None => rand::random(),
        };

        match Simulator::new(config, seed, game).simulate_game() {
            Ok(metrics) => {
                if let Err(e) = writer.write_game(&metrics) {
                    warn!("Failed to write results for game {}: {}", game, e);
                }
                if !metrics.finished {
                    warn!(game, turns = metrics.turns, "Game hit the turn cap");
                }
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game, e);
            }
        }
    }

    writer.finish()?;
    info!(
        games = args.games,
        errors,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Simulation complete"
    );
    Ok(())
}
