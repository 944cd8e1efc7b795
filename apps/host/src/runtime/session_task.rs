//! The session actor: one tokio task owns a [`GameSession`] and serialises
//! every host command and fired timer through a single `select!` loop.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::events::{Participant, SessionEvent};
use crate::domain::game_data::GameData;
use crate::domain::session::{GameSession, SessionSnapshot};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::runtime::sink::SessionSink;
use crate::timers::{DelayQueueScheduler, TimerKind};

const COMMAND_BUFFER: usize = 32;
const NOTICE_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Load(Box<GameData>),
    StartTurn,
    NextWord,
    SkipWord,
    HoldStart,
    HoldEnd,
    Leave(Participant),
    Shutdown,
}

impl HostCommand {
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::Load(_) => "load",
            HostCommand::StartTurn => "start_turn",
            HostCommand::NextWord => "next_word",
            HostCommand::SkipWord => "skip_word",
            HostCommand::HoldStart => "hold_start",
            HostCommand::HoldEnd => "hold_end",
            HostCommand::Leave(_) => "leave",
            HostCommand::Shutdown => "shutdown",
        }
    }
}

/// Things the operator should know about that are not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorNotice {
    /// A score commit could not be delivered. The point is lost.
    ScoreNotRecorded {
        contestant_id: String,
        code: &'static str,
        detail: String,
    },
    LeaveNotDelivered {
        code: &'static str,
        detail: String,
    },
    CommandRejected {
        command: &'static str,
        detail: String,
    },
}

/// Owner-side handle of a running session task.
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<HostCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    notices: broadcast::Sender<OperatorNotice>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub async fn send(&self, command: HostCommand) -> Result<(), AppError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::SessionClosed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<OperatorNotice> {
        self.notices.subscribe()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Close the command channel and wait for the task to wind down.
    pub async fn join(self) -> Result<(), AppError> {
        let SessionHandle { commands, task, .. } = self;
        drop(commands);
        task.await.map_err(|_| AppError::SessionClosed)
    }
}

/// Run `session` on its own task. Must be called inside a tokio runtime.
pub fn spawn_session(
    session: GameSession<DelayQueueScheduler>,
    sink: Arc<dyn SessionSink>,
) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
    let (notice_tx, _) = broadcast::channel(NOTICE_BUFFER);

    let actor = SessionActor {
        session,
        commands: command_rx,
        sink,
        snapshots: snapshot_tx,
        notices: notice_tx.clone(),
    };
    let task = tokio::spawn(actor.run());

    SessionHandle {
        commands: command_tx,
        snapshots: snapshot_rx,
        notices: notice_tx,
        task,
    }
}

enum Step {
    Command(HostCommand),
    Timer(TimerKind),
    Closed,
}

struct SessionActor {
    session: GameSession<DelayQueueScheduler>,
    commands: mpsc::Receiver<HostCommand>,
    sink: Arc<dyn SessionSink>,
    snapshots: watch::Sender<SessionSnapshot>,
    notices: broadcast::Sender<OperatorNotice>,
}

impl SessionActor {
    async fn run(mut self) {
        info!("Session task started");

        loop {
            let timers_pending = self.session.scheduler().pending() > 0;
            let step = tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(command) => Step::Command(command),
                    None => Step::Closed,
                },
                Some(kind) = self.session.scheduler_mut().fired(), if timers_pending => {
                    Step::Timer(kind)
                }
            };

            let leaving = match step {
                Step::Closed | Step::Command(HostCommand::Shutdown) => break,
                Step::Timer(kind) => {
                    self.session.on_timer(kind);
                    false
                }
                Step::Command(command) => {
                    let leaving = matches!(command, HostCommand::Leave(_));
                    let name = command.name();
                    if let Err(err) = apply(&mut self.session, command) {
                        debug!(command = name, error = %err, "Command rejected");
                        self.notify(OperatorNotice::CommandRejected {
                            command: name,
                            detail: err.to_string(),
                        });
                    }
                    leaving
                }
            };

            self.dispatch_events().await;
            self.snapshots.send_replace(self.session.snapshot());

            if leaving {
                break;
            }
        }

        self.session.shutdown();
        self.snapshots.send_replace(self.session.snapshot());
        info!(phase = ?self.session.phase(), "Session task stopped");
    }

    async fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::ScoreCommit(commit) => {
                    let sink = Arc::clone(&self.sink);
                    let notices = self.notices.clone();
                    tokio::spawn(async move {
                        if let Err(err) = sink.commit_score(&commit).await {
                            warn!(
                                game_id = %commit.game_id,
                                contestant_id = %commit.contestant_id,
                                code = err.code(),
                                error = %err,
                                "Score not recorded"
                            );
                            let _ = notices.send(OperatorNotice::ScoreNotRecorded {
                                contestant_id: commit.contestant_id,
                                code: err.code(),
                                detail: err.to_string(),
                            });
                        }
                    });
                }
                SessionEvent::PlayerLeft(notice) => {
                    // Delivered before the task stops so the message is not lost.
                    if let Err(err) = self.sink.announce_leave(&notice).await {
                        warn!(game_id = %notice.game_id, error = %err, "Leave notice not delivered");
                        self.notify(OperatorNotice::LeaveNotDelivered {
                            code: err.code(),
                            detail: err.to_string(),
                        });
                    }
                }
                SessionEvent::TurnStarted { .. }
                | SessionEvent::TurnEnded { .. }
                | SessionEvent::PoolRefilled { .. }
                | SessionEvent::GameFinished => {}
            }
        }
    }

    fn notify(&self, notice: OperatorNotice) {
        // No subscribers is fine.
        let _ = self.notices.send(notice);
    }
}

fn apply(
    session: &mut GameSession<DelayQueueScheduler>,
    command: HostCommand,
) -> Result<(), DomainError> {
    match command {
        HostCommand::Load(data) => session.load(*data),
        HostCommand::StartTurn => session.start_turn(),
        HostCommand::NextWord => session.word_advance(),
        HostCommand::SkipWord => session.word_skip(),
        HostCommand::HoldStart => {
            session.hold_start();
            Ok(())
        }
        HostCommand::HoldEnd => {
            session.hold_end();
            Ok(())
        }
        HostCommand::Leave(participant) => {
            session.leave(participant, OffsetDateTime::now_utc());
            Ok(())
        }
        HostCommand::Shutdown => Ok(()),
    }
}
