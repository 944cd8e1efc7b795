//! Line-oriented host console: command parsing and snapshot rendering.

use crate::domain::leaderboard::Leaderboard;
use crate::domain::round_timer::format_clock;
use crate::domain::session::{Phase, SessionSnapshot};
use crate::runtime::HostCommand;

pub const HELP: &str = "commands: start | next (n) | skip (s) | hold | release | status | \
standings | push <json> | leave | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Host(HostCommand),
    Status,
    Standings,
    /// A raw realtime message, as it would arrive from the socket.
    Push(String),
    Leave,
    Quit,
    Help,
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "start" => ConsoleCommand::Host(HostCommand::StartTurn),
        "next" | "n" => ConsoleCommand::Host(HostCommand::NextWord),
        "skip" | "s" => ConsoleCommand::Host(HostCommand::SkipWord),
        "hold" => ConsoleCommand::Host(HostCommand::HoldStart),
        "release" => ConsoleCommand::Host(HostCommand::HoldEnd),
        "status" => ConsoleCommand::Status,
        "standings" => ConsoleCommand::Standings,
        "push" if rest.is_empty() => return Err("push needs a JSON message".to_string()),
        "push" => ConsoleCommand::Push(rest.to_string()),
        "leave" => ConsoleCommand::Leave,
        "quit" | "exit" => ConsoleCommand::Quit,
        "help" | "?" => ConsoleCommand::Help,
        "" => return Err("empty command".to_string()),
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

/// One status line. The word is masked unless it is currently visible.
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    match snapshot.phase {
        Phase::AwaitingData => "waiting for game data".to_string(),
        Phase::Finished => format!(
            "game {} finished after round {}",
            snapshot.game_id,
            snapshot.round.number()
        ),
        Phase::Waiting | Phase::Playing => {
            let who = snapshot
                .contestant
                .as_ref()
                .map(|c| format!("{} (team {} {})", c.name, c.team_index, c.team_color_id))
                .unwrap_or_else(|| "-".to_string());
            let word = match (&snapshot.current_word, snapshot.word_visible) {
                (Some(word), true) => word.clone(),
                (Some(word), false) => "*".repeat(word.chars().count()),
                (None, _) => "-".to_string(),
            };
            format!(
                "round {} | {} | {:?} | {} | word: {} | left: {} | scored: {}",
                snapshot.round.number(),
                format_clock(snapshot.time_left),
                snapshot.phase,
                who,
                word,
                snapshot.words_remaining,
                snapshot.words_scored_this_turn,
            )
        }
    }
}

pub fn render_standings(board: &Leaderboard) -> String {
    if board.is_empty() {
        return "no standings yet".to_string();
    }
    board
        .standings()
        .iter()
        .enumerate()
        .map(|(place, team)| format!("{}. {} {}", place + 1, team.color_id, team.points))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether two snapshots differ in anything but the clock.
pub fn changed_beyond_clock(a: &SessionSnapshot, b: &SessionSnapshot) -> bool {
    let mut a = a.clone();
    a.time_left = b.time_left;
    a != *b
}
