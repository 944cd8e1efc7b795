use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval between countdown ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// Game round (one pass through the word list): 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Round(u8);

impl Round {
    pub const FIRST: Round = Round(1);
    pub const LAST: Round = Round(3);

    pub fn new(number: u8) -> Option<Round> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&number)
            .then_some(Round(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Next round, capped at [`Round::LAST`].
    pub fn advance(self) -> Round {
        Round((self.0 + 1).min(Self::LAST.0))
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> u8 {
        round.0
    }
}

impl TryFrom<u8> for Round {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Round::new(number).ok_or_else(|| format!("round must be within 1..=3, got {number}"))
    }
}

/// Turn length in seconds for `round`.
///
/// `leftover` is the time left when the previous turn ended. A turn that runs
/// out of time leaves 0, so the carry-over only applies after a turn that
/// ended because the word pool ran dry.
pub fn round_duration(round: Round, leftover: u32) -> u32 {
    match round.number() {
        1 => 60,
        2 => {
            if leftover == 0 {
                90
            } else {
                30 + leftover
            }
        }
        _ => {
            if leftover == 0 {
                60
            } else {
                leftover.min(60)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u32),
    Expired,
}

/// Seconds remaining in the active turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    time_left: u32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self { time_left: seconds }
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn tick(&mut self) -> Tick {
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            Tick::Expired
        } else {
            Tick::Running(self.time_left)
        }
    }

    pub fn expire(&mut self) {
        self.time_left = 0;
    }
}

/// Render seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
