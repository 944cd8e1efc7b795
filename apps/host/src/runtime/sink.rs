//! Outbound collaborators of a running session.

use async_trait::async_trait;
use tracing::info;

use crate::domain::events::{LeaveNotice, ScoreCommit};
use crate::error::AppError;

/// Receives the records a session emits. Delivery is fire-and-forget from
/// the session's point of view: a failure is reported, never retried.
#[async_trait]
pub trait SessionSink: Send + Sync {
    /// Record one point for the contestant in `commit`.
    async fn commit_score(&self, commit: &ScoreCommit) -> Result<(), AppError>;

    /// Tell other participants that someone left.
    async fn announce_leave(&self, notice: &LeaveNotice) -> Result<(), AppError>;
}

/// Sink that only logs. Used for offline sessions loaded from a file.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl SessionSink for LogSink {
    async fn commit_score(&self, commit: &ScoreCommit) -> Result<(), AppError> {
        info!(
            game_id = %commit.game_id,
            contestant_id = %commit.contestant_id,
            "Score commit (offline)"
        );
        Ok(())
    }

    async fn announce_leave(&self, notice: &LeaveNotice) -> Result<(), AppError> {
        info!(
            game_id = %notice.game_id,
            player_name = %notice.player_name,
            "Leave notice (offline)"
        );
        Ok(())
    }
}
