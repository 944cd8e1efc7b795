//! Records the engine emits for collaborators outside the turn engine.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::round_timer::Round;

/// One guessed word, credited to the active contestant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCommit {
    pub game_id: String,
    pub contestant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveNotice {
    pub game_id: String,
    pub player_id: String,
    pub player_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Whoever is operating the session (usually the host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEndReason {
    /// Countdown reached zero.
    TimeUp,
    /// Word pool ran dry mid-turn.
    PoolEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ScoreCommit(ScoreCommit),
    PlayerLeft(LeaveNotice),
    TurnStarted {
        contestant_index: usize,
        round: Round,
        duration: u32,
    },
    TurnEnded {
        contestant_index: usize,
        time_left: u32,
        reason: TurnEndReason,
    },
    PoolRefilled {
        passes_completed: u8,
        round: Round,
    },
    GameFinished,
}
