//! Whole-session simulation on a virtual clock.
//!
//! A bot host plays every turn: it "thinks" for a few seconds, then either
//! scores the word or skips it. Time only moves through
//! `GameSession::advance`, so a full three-pass game runs in microseconds.

use std::time::Duration;

use associations::domain::{
    GameData, GameSession, Phase, Player, SeededIndex, SessionEvent, Team, TurnEndReason,
};
use associations::ManualScheduler;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::metrics::GameMetrics;

const TEAM_COLORS: [&str; 6] = ["Зелени", "Сини", "Червени", "Оранжеви", "Розови", "Бели"];

#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub teams: usize,
    pub players_per_team: usize,
    pub words: usize,
    /// Probability that the contestant's team guesses the word.
    pub guess_rate: f64,
    /// Thinking time per word, in whole seconds.
    pub think_min: u64,
    pub think_max: u64,
    /// Safety cap for bots that never guess.
    pub max_turns: u32,
}

pub struct Simulator {
    config: SimConfig,
    seed: u64,
    game: u32,
}

impl Simulator {
    pub fn new(config: SimConfig, seed: u64, game: u32) -> Self {
        Self { config, seed, game }
    }

    pub fn game_data(&self) -> GameData {
        let teams = (0..self.config.teams)
            .map(|t| Team {
                color_id: TEAM_COLORS[t % TEAM_COLORS.len()].to_string(),
                players: (0..self.config.players_per_team)
                    .map(|p| Player {
                        name: format!("Team{}-Player{}", t + 1, p + 1),
                        id: format!("g{}-t{}-p{}", self.game, t + 1, p + 1),
                    })
                    .collect(),
                points: 0,
            })
            .collect();
        GameData {
            id: format!("sim-{}", self.game),
            teams,
            words: (0..self.config.words).map(|i| format!("word{i}")).collect(),
            players_per_team: self.config.players_per_team,
        }
    }

    pub fn simulate_game(&self) -> Result<GameMetrics, Box<dyn std::error::Error>> {
        let data = self.game_data();
        let mut metrics = GameMetrics {
            game: self.game,
            seed: self.seed,
            teams: data.teams.len(),
            players_per_team: data.players_per_team,
            words: data.words.len(),
            ..GameMetrics::default()
        };

        let team_of: Vec<(String, String)> = data
            .teams
            .iter()
            .flat_map(|team| {
                team.players
                    .iter()
                    .map(|p| (p.id.clone(), team.color_id.clone()))
            })
            .collect();

        let mut session = GameSession::new(
            ManualScheduler::new(),
            Box::new(SeededIndex::from_seed(self.seed)),
        );
        session.load(data)?;
        let mut bot = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(1));

        while session.phase() == Phase::Waiting && metrics.turns < self.config.max_turns {
            session.start_turn()?;
            metrics.turns += 1;

            while session.phase() == Phase::Playing {
                let think = bot.random_range(self.config.think_min..=self.config.think_max);
                session.advance(Duration::from_secs(think));
                if session.phase() != Phase::Playing {
                    break;
                }
                if bot.random_bool(self.config.guess_rate) {
                    session.word_advance()?;
                } else {
                    session.word_skip()?;
                    metrics.skips += 1;
                }
            }

            for event in session.drain_events() {
                record(&mut metrics, &team_of, event);
            }
        }

        metrics.passes_completed = session.pool().passes_completed();
        metrics.finished = session.phase() == Phase::Finished;
        metrics.virtual_seconds = session.scheduler().now().as_secs();
        session.shutdown();
        Ok(metrics)
    }
}

fn record(metrics: &mut GameMetrics, team_of: &[(String, String)], event: SessionEvent) {
    match event {
        SessionEvent::ScoreCommit(commit) => {
            *metrics
                .scores
                .entry(commit.contestant_id.clone())
                .or_default() += 1;
            if let Some((_, team)) = team_of.iter().find(|(id, _)| *id == commit.contestant_id) {
                *metrics.team_scores.entry(team.clone()).or_default() += 1;
            }
        }
        SessionEvent::TurnEnded { reason, .. } => match reason {
            TurnEndReason::TimeUp => metrics.time_up_turns += 1,
            TurnEndReason::PoolEmpty => metrics.pool_empty_turns += 1,
        },
        SessionEvent::TurnStarted { .. }
        | SessionEvent::PoolRefilled { .. }
        | SessionEvent::PlayerLeft(_)
        | SessionEvent::GameFinished => {}
    }
}
