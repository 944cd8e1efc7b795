//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per game
    Jsonl,
    /// Summary line per game
    Text,
}
