//! Shared helpers for the host's integration tests: logging bootstrap and
//! unique identifiers so concurrently running tests never share a game id.

pub mod logging;

use ulid::Ulid;

/// `{prefix}-{ulid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A fresh game id, as the game API would hand out.
pub fn unique_game_id() -> String {
    unique_str("game")
}
