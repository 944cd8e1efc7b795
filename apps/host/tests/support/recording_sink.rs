//! A `SessionSink` that hands every record to the test through channels.

use associations::domain::{LeaveNotice, ScoreCommit};
use associations::{AppError, SessionSink};
use async_trait::async_trait;
use tokio::sync::mpsc;

pub struct RecordingSink {
    commits: mpsc::UnboundedSender<ScoreCommit>,
    leaves: mpsc::UnboundedSender<LeaveNotice>,
    fail_scores: bool,
}

pub struct Recorded {
    pub commits: mpsc::UnboundedReceiver<ScoreCommit>,
    pub leaves: mpsc::UnboundedReceiver<LeaveNotice>,
}

impl RecordingSink {
    pub fn pair() -> (Self, Recorded) {
        Self::build(false)
    }

    /// Records commits but reports every one of them as failed.
    pub fn failing_pair() -> (Self, Recorded) {
        Self::build(true)
    }

    fn build(fail_scores: bool) -> (Self, Recorded) {
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();
        let (leave_tx, leave_rx) = mpsc::unbounded_channel();
        (
            Self {
                commits: commit_tx,
                leaves: leave_tx,
                fail_scores,
            },
            Recorded {
                commits: commit_rx,
                leaves: leave_rx,
            },
        )
    }
}

#[async_trait]
impl SessionSink for RecordingSink {
    async fn commit_score(&self, commit: &ScoreCommit) -> Result<(), AppError> {
        let _ = self.commits.send(commit.clone());
        if self.fail_scores {
            return Err(AppError::Http {
                status: 503,
                detail: "score service unavailable".into(),
            });
        }
        Ok(())
    }

    async fn announce_leave(&self, notice: &LeaveNotice) -> Result<(), AppError> {
        let _ = self.leaves.send(notice.clone());
        Ok(())
    }
}
