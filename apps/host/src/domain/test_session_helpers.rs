// Builders shared by the domain unit tests.

use crate::domain::game_data::{GameData, Player, Team};
use crate::domain::session::GameSession;
use crate::domain::word_pool::tests::ScriptedIndex;
use crate::domain::word_pool::SeededIndex;
use crate::timers::ManualScheduler;

pub(crate) const TEAM_COLORS: [&str; 6] = [
    "Зелени", "Сини", "Червени", "Оранжеви", "Розови", "Бели",
];

/// `team_sizes[i]` players in team `i`, named `t{i}p{j}`.
pub(crate) fn game_data<W: AsRef<str>>(
    team_sizes: &[usize],
    players_per_team: usize,
    words: &[W],
) -> GameData {
    let teams = team_sizes
        .iter()
        .enumerate()
        .map(|(t, size)| Team {
            color_id: TEAM_COLORS[t % TEAM_COLORS.len()].to_string(),
            players: (0..*size)
                .map(|p| Player {
                    name: format!("t{t}p{p}"),
                    id: format!("id-t{t}p{p}"),
                })
                .collect(),
            points: 0,
        })
        .collect();
    GameData {
        id: "game-1".into(),
        teams,
        words: words.iter().map(|w| w.as_ref().to_string()).collect(),
        players_per_team,
    }
}

/// Session on a virtual clock that always draws the first remaining word.
pub(crate) fn loaded(data: GameData) -> GameSession<ManualScheduler> {
    let mut session = GameSession::new(
        ManualScheduler::new(),
        Box::new(ScriptedIndex::new(Vec::new())),
    );
    session.load(data).unwrap();
    session
}

pub(crate) fn loaded_seeded(data: GameData, seed: u64) -> GameSession<ManualScheduler> {
    let mut session =
        GameSession::new(ManualScheduler::new(), Box::new(SeededIndex::from_seed(seed)));
    session.load(data).unwrap();
    session
}

pub(crate) fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("w{i}")).collect()
}
