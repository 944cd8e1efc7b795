//! Contestant rotation across teams.

use std::sync::Arc;

use crate::domain::game_data::Team;

/// Upper bound on the length of a built order.
pub const MAX_CONTESTANTS: usize = 4096;

/// A player in their turn-taking role, annotated with team context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contestant {
    pub name: String,
    pub id: String,
    /// 1-based position of the team in the game data.
    pub team_index: usize,
    pub team_color_id: String,
    pub team: Arc<Team>,
}

/// Build the round-robin contestant order.
///
/// Teams are visited 0, 1, .., N-1, 0, 1, ..; each time the cycle returns to
/// team 0 the shared player index moves on, so contestant `k` is
/// `teams[k mod N].players[(k / N) mod team_size]`. The order holds
/// `N * players_per_team` entries, clamped to [`MAX_CONTESTANTS`] rounded down
/// to a whole number of cycles. Teams without players are never seated.
pub fn build_order(teams: &[Team], players_per_team: usize) -> Vec<Contestant> {
    let seated: Vec<(usize, Arc<Team>)> = teams
        .iter()
        .enumerate()
        .filter(|(_, team)| !team.players.is_empty())
        .map(|(index, team)| (index, Arc::new(team.clone())))
        .collect();

    let team_count = seated.len();
    if team_count == 0 {
        return Vec::new();
    }

    let len = order_len(team_count, players_per_team);
    let mut order = Vec::with_capacity(len);
    for k in 0..len {
        let (team_pos, team) = &seated[k % team_count];
        let player_index = k / team_count;
        let player = &team.players[player_index % team.players.len()];
        order.push(Contestant {
            name: player.name.clone(),
            id: player.id.clone(),
            team_index: team_pos + 1,
            team_color_id: team.color_id.clone(),
            team: Arc::clone(team),
        });
    }
    order
}

fn order_len(team_count: usize, players_per_team: usize) -> usize {
    let cap = (MAX_CONTESTANTS - MAX_CONTESTANTS % team_count).max(team_count);
    team_count.saturating_mul(players_per_team).min(cap)
}

/// Cursor position after `cursor` in an order of `len` contestants.
#[inline]
pub fn next_cursor(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + 1) % len
    }
}
