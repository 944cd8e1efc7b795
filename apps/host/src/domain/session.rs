//! Turn engine state machine.
//!
//! `AwaitingData → Waiting → Playing → Waiting → … → Finished`
//!
//! `GameSession` owns the contestant cursor, the countdown, the reveal state
//! and the word pool. It is driven by host commands and fired timers, one at
//! a time, and records outbound [`SessionEvent`]s for the caller to drain.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::domain::events::{LeaveNotice, Participant, ScoreCommit, SessionEvent, TurnEndReason};
use crate::domain::game_data::GameData;
use crate::domain::reveal::RevealController;
use crate::domain::round_timer::{round_duration, Countdown, Round, Tick, TICK};
use crate::domain::turn_order::{build_order, next_cursor, Contestant};
use crate::domain::word_pool::{Exhaustion, IndexSource, WordPool};
use crate::errors::domain::DomainError;
use crate::timers::{ManualScheduler, Scheduler, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No valid game data yet.
    AwaitingData,
    /// Between turns.
    Waiting,
    /// A contestant's turn is running.
    Playing,
    /// Terminal.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestantView {
    pub name: String,
    pub id: String,
    pub team_index: usize,
    pub team_color_id: String,
}

impl From<&Contestant> for ContestantView {
    fn from(c: &Contestant) -> Self {
        Self {
            name: c.name.clone(),
            id: c.id.clone(),
            team_index: c.team_index,
            team_color_id: c.team_color_id.clone(),
        }
    }
}

/// Read-only view of the session for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub game_id: String,
    pub phase: Phase,
    pub round: Round,
    pub time_left: u32,
    pub contestant_index: usize,
    pub contestant: Option<ContestantView>,
    pub current_word: Option<String>,
    pub word_visible: bool,
    pub holding: bool,
    pub passes_completed: u8,
    pub words_remaining: usize,
    pub words_scored_this_turn: u32,
}

impl SessionSnapshot {
    /// The word as it should appear on screen right now.
    pub fn visible_word(&self) -> Option<&str> {
        if self.word_visible {
            self.current_word.as_deref()
        } else {
            None
        }
    }
}

pub struct GameSession<S: Scheduler> {
    scheduler: S,
    phase: Phase,
    game_id: String,
    contestants: Vec<Contestant>,
    cursor: usize,
    pool: WordPool,
    round: Round,
    countdown: Countdown,
    leftover: u32,
    reveal: RevealController,
    current_word: Option<String>,
    words_scored_this_turn: u32,
    events: Vec<SessionEvent>,
}

impl<S: Scheduler> GameSession<S> {
    /// New session in `AwaitingData`.
    pub fn new(scheduler: S, picker: Box<dyn IndexSource>) -> Self {
        Self {
            scheduler,
            phase: Phase::AwaitingData,
            game_id: String::new(),
            contestants: Vec::new(),
            cursor: 0,
            pool: WordPool::new(Vec::new(), picker),
            round: Round::FIRST,
            countdown: Countdown::default(),
            leftover: 0,
            reveal: RevealController::default(),
            current_word: None,
            words_scored_this_turn: 0,
            events: Vec::new(),
        }
    }

    /// Build the contestant order and word pool from `data`.
    ///
    /// Invalid data is rejected and the session stays in `AwaitingData`
    /// until a valid payload arrives.
    pub fn load(&mut self, data: GameData) -> Result<(), DomainError> {
        self.expect_phase(Phase::AwaitingData, "load")?;
        if let Err(err) = data.validate() {
            warn!(game_id = %data.id, error = %err, "Game data rejected; still awaiting data");
            return Err(err);
        }

        self.contestants = build_order(&data.teams, data.players_per_team);
        self.pool.reset(data.words);
        self.game_id = data.id;
        self.cursor = 0;
        self.round = Round::FIRST;
        self.leftover = 0;
        self.phase = Phase::Waiting;

        info!(
            game_id = %self.game_id,
            contestants = self.contestants.len(),
            words = self.pool.full_len(),
            "Game data loaded"
        );
        Ok(())
    }

    pub fn start_turn(&mut self) -> Result<(), DomainError> {
        self.expect_phase(Phase::Waiting, "start_turn")?;

        let duration = round_duration(self.round, self.leftover);
        self.countdown = Countdown::new(duration);
        self.words_scored_this_turn = 0;
        self.phase = Phase::Playing;
        self.scheduler.arm(TimerKind::Countdown, TICK);
        self.events.push(SessionEvent::TurnStarted {
            contestant_index: self.cursor,
            round: self.round,
            duration,
        });
        info!(
            game_id = %self.game_id,
            round = self.round.number(),
            contestant = self.cursor,
            duration,
            "Turn started"
        );

        self.show_next_word();
        Ok(())
    }

    /// "Next word": the current word was guessed.
    pub fn word_advance(&mut self) -> Result<(), DomainError> {
        self.expect_phase(Phase::Playing, "word_advance")?;

        if let Some(word) = self.current_word.take() {
            self.pool.remove(&word);
        }
        if let Some(contestant) = self.contestants.get(self.cursor) {
            self.events.push(SessionEvent::ScoreCommit(ScoreCommit {
                game_id: self.game_id.clone(),
                contestant_id: contestant.id.clone(),
            }));
        }
        self.words_scored_this_turn += 1;

        self.show_next_word();
        Ok(())
    }

    /// "Skip word": draw again without consuming the current word.
    pub fn word_skip(&mut self) -> Result<(), DomainError> {
        self.expect_phase(Phase::Playing, "word_skip")?;
        self.show_next_word();
        Ok(())
    }

    /// End the running turn with no time left; the next contestant is up.
    pub fn timer_expire(&mut self) -> Result<(), DomainError> {
        self.expect_phase(Phase::Playing, "timer_expire")?;
        self.countdown.expire();
        self.end_turn(TurnEndReason::TimeUp);
        Ok(())
    }

    /// Ignored unless a turn is running with a word drawn.
    pub fn hold_start(&mut self) {
        if !self.word_on_table() {
            debug!(phase = ?self.phase, "Hold ignored");
            return;
        }
        self.reveal.on_hold_start(&mut self.scheduler);
    }

    /// Ignored unless a turn is running with a word drawn.
    pub fn hold_end(&mut self) {
        if !self.word_on_table() {
            debug!(phase = ?self.phase, "Release ignored");
            return;
        }
        self.reveal.on_hold_end(&mut self.scheduler);
    }

    /// Dispatch a fired timer.
    pub fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Countdown => self.on_countdown_tick(),
            TimerKind::RevealHide => self.reveal.on_hide_due(),
            TimerKind::RevealShow => self.reveal.on_show_due(),
        }
    }

    /// The participant exits: announce it and tear the session down.
    pub fn leave(&mut self, participant: Participant, at: OffsetDateTime) {
        self.events.push(SessionEvent::PlayerLeft(LeaveNotice {
            game_id: self.game_id.clone(),
            player_id: participant.id,
            player_name: participant.name,
            timestamp: at,
        }));
        self.shutdown();
        self.phase = Phase::Finished;
        info!(game_id = %self.game_id, "Participant left; session closed");
    }

    /// Cancel every pending timer. Nothing fires afterwards.
    pub fn shutdown(&mut self) {
        self.scheduler.disarm_all();
        self.reveal.reset(&mut self.scheduler);
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.game_id.clone(),
            phase: self.phase,
            round: self.round,
            time_left: self.countdown.time_left(),
            contestant_index: self.cursor,
            contestant: self.contestants.get(self.cursor).map(ContestantView::from),
            current_word: self.current_word.clone(),
            word_visible: self.reveal.visible(),
            holding: self.reveal.holding(),
            passes_completed: self.pool.passes_completed(),
            words_remaining: self.pool.len(),
            words_scored_this_turn: self.words_scored_this_turn,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    pub fn current_contestant(&self) -> Option<&Contestant> {
        self.contestants.get(self.cursor)
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn word_visible(&self) -> bool {
        self.reveal.visible()
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.time_left()
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::phase_mismatch(action, self.phase))
        }
    }

    fn word_on_table(&self) -> bool {
        self.phase == Phase::Playing && self.current_word.is_some()
    }

    fn on_countdown_tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        match self.countdown.tick() {
            Tick::Running(_) => self.scheduler.arm(TimerKind::Countdown, TICK),
            Tick::Expired => self.end_turn(TurnEndReason::TimeUp),
        }
    }

    /// Draw the next word, or end the turn early if the pool is dry.
    fn show_next_word(&mut self) {
        match self.pool.draw() {
            Some(word) => {
                self.current_word = Some(word);
                self.reveal.on_word_drawn(&mut self.scheduler);
            }
            None => {
                self.end_turn(TurnEndReason::PoolEmpty);
                self.pool_exhausted();
            }
        }
    }

    fn end_turn(&mut self, reason: TurnEndReason) {
        self.scheduler.disarm(TimerKind::Countdown);
        self.reveal.reset(&mut self.scheduler);
        self.current_word = None;
        self.leftover = self.countdown.time_left();
        self.phase = Phase::Waiting;

        let ended = self.cursor;
        if reason == TurnEndReason::TimeUp {
            self.cursor = next_cursor(self.cursor, self.contestants.len());
        }
        self.events.push(SessionEvent::TurnEnded {
            contestant_index: ended,
            time_left: self.leftover,
            reason,
        });
        info!(
            game_id = %self.game_id,
            contestant = ended,
            next = self.cursor,
            time_left = self.leftover,
            reason = ?reason,
            "Turn ended"
        );
    }

    fn pool_exhausted(&mut self) {
        match self.pool.on_exhausted() {
            Exhaustion::Refilled { passes_completed } => {
                self.round = self.round.advance();
                self.events.push(SessionEvent::PoolRefilled {
                    passes_completed,
                    round: self.round,
                });
                info!(
                    game_id = %self.game_id,
                    passes_completed,
                    round = self.round.number(),
                    "Word pool refilled"
                );
            }
            Exhaustion::Finished => {
                self.shutdown();
                self.current_word = None;
                self.phase = Phase::Finished;
                self.events.push(SessionEvent::GameFinished);
                info!(game_id = %self.game_id, "Game finished");
            }
        }
    }
}

impl GameSession<ManualScheduler> {
    /// Move the virtual clock forward by `by`, firing every timer that falls
    /// due on the way, in order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(kind) = self.scheduler.next_due(until) {
            self.on_timer(kind);
        }
        self.scheduler.set_now(until);
    }
}

impl<S: Scheduler> fmt::Debug for GameSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("game_id", &self.game_id)
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("cursor", &self.cursor)
            .field("time_left", &self.countdown.time_left())
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
