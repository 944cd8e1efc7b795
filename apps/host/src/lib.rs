#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod api;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod errors;
pub mod protocol;
pub mod runtime;
pub mod timers;


// Re-exports for public API
pub use api::GameApi;
pub use config::HostConfig;
pub use domain::{GameData, GameSession, Phase, SessionEvent, SessionSnapshot};
pub use error::AppError;
pub use runtime::{spawn_session, HostCommand, OperatorNotice, SessionHandle, SessionSink};
pub use timers::{DelayQueueScheduler, ManualScheduler, Scheduler, TimerKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
