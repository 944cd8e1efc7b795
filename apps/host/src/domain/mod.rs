//! Domain layer: the turn engine and the records it exchanges.

pub mod events;
pub mod game_data;
pub mod leaderboard;
pub mod reveal;
pub mod round_timer;
pub mod session;
pub mod turn_order;
pub mod word_pool;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_session_helpers;
#[cfg(test)]
mod tests_reveal_timing;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use events::{LeaveNotice, Participant, ScoreCommit, SessionEvent, TurnEndReason};
pub use game_data::{GameData, Player, Team};
pub use leaderboard::Leaderboard;
pub use round_timer::{format_clock, round_duration, Round};
pub use session::{GameSession, Phase, SessionSnapshot};
pub use turn_order::{build_order, Contestant};
pub use word_pool::{IndexSource, SeededIndex, WordPool};
