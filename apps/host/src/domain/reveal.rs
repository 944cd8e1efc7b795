//! Word visibility: flash on draw, press-and-hold to peek.
//!
//! The host device is shown to the audience, so the secret word is visible
//! only briefly after each draw and again while the contestant holds the
//! screen.

use std::time::Duration;

use crate::timers::{Scheduler, TimerKind};

/// How long a freshly drawn word stays on screen.
pub const AUTO_HIDE_AFTER: Duration = Duration::from_millis(1000);

/// Delay between a hold starting and the word appearing, so the timer
/// display can move out of the way first.
pub const HOLD_REVEAL_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealController {
    visible: bool,
    holding: bool,
}

impl RevealController {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn holding(&self) -> bool {
        self.holding
    }

    pub fn on_word_drawn<S: Scheduler + ?Sized>(&mut self, timers: &mut S) {
        self.visible = true;
        if self.holding {
            timers.disarm(TimerKind::RevealHide);
        } else {
            timers.arm(TimerKind::RevealHide, AUTO_HIDE_AFTER);
        }
    }

    pub fn on_hold_start<S: Scheduler + ?Sized>(&mut self, timers: &mut S) {
        self.holding = true;
        timers.disarm(TimerKind::RevealHide);
        timers.arm(TimerKind::RevealShow, HOLD_REVEAL_DELAY);
    }

    pub fn on_hold_end<S: Scheduler + ?Sized>(&mut self, timers: &mut S) {
        self.holding = false;
        self.visible = false;
        timers.disarm(TimerKind::RevealShow);
        timers.disarm(TimerKind::RevealHide);
    }

    /// `RevealShow` fired.
    pub fn on_show_due(&mut self) {
        if self.holding {
            self.visible = true;
        }
    }

    /// `RevealHide` fired.
    pub fn on_hide_due(&mut self) {
        if !self.holding {
            self.visible = false;
        }
    }

    /// Hide everything and drop pending reveal timers.
    pub fn reset<S: Scheduler + ?Sized>(&mut self, timers: &mut S) {
        self.visible = false;
        self.holding = false;
        timers.disarm(TimerKind::RevealShow);
        timers.disarm(TimerKind::RevealHide);
    }
}
