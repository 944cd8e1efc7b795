use std::collections::HashMap;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio_util::time::delay_queue::{DelayQueue, Key};

use super::{Scheduler, TimerKind};

/// Tokio-backed scheduler, polled by the session task that owns it.
///
/// Cancellation and expiry are both handled on the owning task, so there is
/// no window in which a disarmed timer is already in flight.
#[derive(Default)]
pub struct DelayQueueScheduler {
    queue: DelayQueue<TimerKind>,
    keys: HashMap<TimerKind, Key>,
}

impl DelayQueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for the next fired timer. `Ready(None)` when nothing is armed.
    pub fn poll_fired(&mut self, cx: &mut Context<'_>) -> Poll<Option<TimerKind>> {
        match self.queue.poll_expired(cx) {
            Poll::Ready(Some(expired)) => {
                let kind = expired.into_inner();
                self.keys.remove(&kind);
                Poll::Ready(Some(kind))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    pub async fn fired(&mut self) -> Option<TimerKind> {
        futures::future::poll_fn(|cx| self.poll_fired(cx)).await
    }

    pub fn pending(&self) -> usize {
        self.keys.len()
    }
}

impl Scheduler for DelayQueueScheduler {
    fn arm(&mut self, kind: TimerKind, after: Duration) {
        self.disarm(kind);
        let key = self.queue.insert(kind, after);
        self.keys.insert(kind, key);
    }

    fn disarm(&mut self, kind: TimerKind) {
        if let Some(key) = self.keys.remove(&kind) {
            self.queue.remove(&key);
        }
    }

    fn is_armed(&self, kind: TimerKind) -> bool {
        self.keys.contains_key(&kind)
    }
}
