//! Cancellable one-shot timers, one pending instance per concern.
//!
//! The engine never holds a raw timer handle. It asks a [`Scheduler`] to arm
//! or disarm a [`TimerKind`], and the scheduler keeps at most one pending
//! instance of each kind: arming replaces, disarming removes the entry from
//! the queue itself, so a cancelled timer cannot fire late.

pub mod delay_queue;
pub mod manual;

use std::time::Duration;

pub use delay_queue::DelayQueueScheduler;
pub use manual::ManualScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 1 Hz turn countdown.
    Countdown,
    /// Auto-hide of a freshly drawn word.
    RevealHide,
    /// Delayed reveal after a hold starts.
    RevealShow,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [
        TimerKind::Countdown,
        TimerKind::RevealHide,
        TimerKind::RevealShow,
    ];
}

pub trait Scheduler {
    /// Fire `kind` after `after`, replacing any pending instance of that kind.
    fn arm(&mut self, kind: TimerKind, after: Duration);

    /// Drop the pending instance of `kind`, if any.
    fn disarm(&mut self, kind: TimerKind);

    fn is_armed(&self, kind: TimerKind) -> bool;

    fn disarm_all(&mut self) {
        for kind in TimerKind::ALL {
            self.disarm(kind);
        }
    }
}
