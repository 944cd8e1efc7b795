//! Per-game results written by the simulator.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct GameMetrics {
    pub game: u32,
    pub seed: u64,
    pub teams: usize,
    pub players_per_team: usize,
    pub words: usize,
    pub turns: u32,
    pub time_up_turns: u32,
    pub pool_empty_turns: u32,
    pub skips: u32,
    pub passes_completed: u8,
    pub finished: bool,
    /// Virtual seconds from the first turn to the end of the game.
    pub virtual_seconds: u64,
    /// Points per contestant id.
    pub scores: BTreeMap<String, u32>,
    /// Points per team color.
    pub team_scores: BTreeMap<String, u32>,
}

impl GameMetrics {
    pub fn summary_line(&self) -> String {
        let leader = self
            .team_scores
            .iter()
            .max_by_key(|(_, points)| **points)
            .map(|(team, points)| format!("{team} ({points})"))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "game {} seed {}: {} turns ({} timed out, {} pool-empty), {} skips, {}s, leader {}{}",
            self.game,
            self.seed,
            self.turns,
            self.time_up_turns,
            self.pool_empty_turns,
            self.skips,
            self.virtual_seconds,
            leader,
            if self.finished { "" } else { " [truncated]" },
        )
    }
}
