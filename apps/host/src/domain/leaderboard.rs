//! Team standings pushed from outside the engine.
//!
//! Score updates arrive from the realtime channel and are merged here for
//! display only. Nothing in this module touches the contestant order, the
//! word pool or the countdown.

use crate::domain::game_data::Team;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    teams: Vec<Team>,
}

impl Leaderboard {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Merge a pushed update. An update without teams keeps the current ones.
    pub fn merge(&mut self, update: Option<Vec<Team>>) -> bool {
        match update {
            Some(teams) if teams != self.teams => {
                self.teams = teams;
                true
            }
            _ => false,
        }
    }

    /// Teams by points, highest first; ties keep their original order.
    pub fn standings(&self) -> Vec<&Team> {
        let mut sorted: Vec<&Team> = self.teams.iter().collect();
        sorted.sort_by(|a, b| b.points.cmp(&a.points));
        sorted
    }

    pub fn team_of(&self, player_name: &str) -> Option<&Team> {
        self.teams
            .iter()
            .find(|team| team.players.iter().any(|p| p.name == player_name))
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
