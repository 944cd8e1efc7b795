//! Game data supplied by the game API once the host starts the game.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub id: String,
}

/// A team as delivered by the game API.
///
/// `points` is only meaningful to the leaderboard; the turn engine never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(alias = "color")]
    pub color_id: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub players_per_team: usize,
}

impl GameData {
    /// Check that a session can be built from this payload.
    ///
    /// Every team needs at least one player, otherwise the contestant order
    /// has no one to seat for that team.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingGameId,
                "Game id is empty",
            ));
        }
        if self.teams.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingTeams,
                "Game has no teams",
            ));
        }
        if let Some(team) = self.teams.iter().find(|t| t.players.is_empty()) {
            return Err(DomainError::validation(
                ValidationKind::EmptyTeam,
                format!("Team '{}' has no players", team.color_id),
            ));
        }
        if self.words.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingWords,
                "Game has no words",
            ));
        }
        if self.players_per_team == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayersPerTeam,
                "playersPerTeam must be at least 1",
            ));
        }
        Ok(())
    }
}
