//! Word pool: random draw, removal on score, and refill on exhaustion.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Refills allowed before an exhausted pool ends the game (three passes total).
pub const MAX_REFILLS: u8 = 2;

/// Source of random indexes for word draws.
pub trait IndexSource: Send {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Seedable [`IndexSource`] backed by ChaCha8.
pub struct SeededIndex {
    rng: ChaCha8Rng,
}

impl SeededIndex {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Non-deterministic source for live sessions.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }
}

impl IndexSource for SeededIndex {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// What happened when the pool ran dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    Refilled { passes_completed: u8 },
    Finished,
}

pub struct WordPool {
    full: Vec<String>,
    remaining: Vec<String>,
    passes_completed: u8,
    picker: Box<dyn IndexSource>,
}

impl WordPool {
    pub fn new(words: Vec<String>, picker: Box<dyn IndexSource>) -> Self {
        Self {
            remaining: words.clone(),
            full: words,
            passes_completed: 0,
            picker,
        }
    }

    /// Replace the word list and start over at pass zero.
    pub fn reset(&mut self, words: Vec<String>) {
        self.remaining = words.clone();
        self.full = words;
        self.passes_completed = 0;
    }

    /// Pick a uniformly random remaining word without removing it.
    ///
    /// Repeated draws can return the same word until it is removed; skipping a
    /// word relies on this. `None` means the pool is exhausted.
    pub fn draw(&mut self) -> Option<String> {
        if self.remaining.is_empty() {
            return None;
        }
        let index = self.picker.pick(self.remaining.len());
        self.remaining.get(index).cloned()
    }

    /// Remove exactly one occurrence of `word`.
    pub fn remove(&mut self, word: &str) -> bool {
        match self.remaining.iter().position(|w| w == word) {
            Some(index) => {
                self.remaining.remove(index);
                true
            }
            None => false,
        }
    }

    /// Restore the full word list and count the pass as completed.
    pub fn refill(&mut self) {
        self.remaining = self.full.clone();
        self.passes_completed = self.passes_completed.saturating_add(1);
    }

    /// Apply the exhaustion policy: refill up to [`MAX_REFILLS`] times, then finish.
    pub fn on_exhausted(&mut self) -> Exhaustion {
        if self.passes_completed < MAX_REFILLS {
            self.refill();
            Exhaustion::Refilled {
                passes_completed: self.passes_completed,
            }
        } else {
            Exhaustion::Finished
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn full_len(&self) -> usize {
        self.full.len()
    }

    pub fn passes_completed(&self) -> u8 {
        self.passes_completed
    }
}

impl fmt::Debug for WordPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPool")
            .field("remaining", &self.remaining.len())
            .field("full", &self.full.len())
            .field("passes_completed", &self.passes_completed)
            .finish_non_exhaustive()
    }
}
