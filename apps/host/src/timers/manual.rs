use std::collections::HashMap;
use std::time::Duration;

use super::{Scheduler, TimerKind};

/// Virtual-clock scheduler for tests and offline simulation.
///
/// Time only moves when the caller asks for due timers. Timers due at the
/// same instant fire in the order they were armed.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    pending: HashMap<TimerKind, (Duration, u64)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Duration> {
        self.pending.get(&kind).map(|(at, _)| *at)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn next_due(&mut self, until: Duration) -> Option<TimerKind> {
        let (kind, at) = self
            .pending
            .iter()
            .filter(|(_, (at, _))| *at <= until)
            .min_by_key(|(_, (at, seq))| (*at, *seq))
            .map(|(kind, (at, _))| (*kind, *at))?;
        self.pending.remove(&kind);
        self.now = self.now.max(at);
        Some(kind)
    }

    /// Move the clock forward to `at` without firing anything.
    pub fn set_now(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, kind: TimerKind, after: Duration) {
        self.seq += 1;
        self.pending.insert(kind, (self.now + after, self.seq));
    }

    fn disarm(&mut self, kind: TimerKind) {
        self.pending.remove(&kind);
    }

    fn is_armed(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }
}
