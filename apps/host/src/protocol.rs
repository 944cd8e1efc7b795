//! Wire shapes for the realtime channel. The transport itself lives elsewhere;
//! this module only encodes and decodes messages.

use serde::{Deserialize, Serialize};

use crate::domain::events::LeaveNotice;
use crate::domain::game_data::Team;
use crate::error::AppError;

/// Messages pushed to the host by the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundMessage {
    #[serde(rename_all = "camelCase")]
    Join {
        name: String,
        #[serde(default)]
        player_id: Option<String>,
    },
    /// The game was started; fetch the full game data.
    Start,
    #[serde(rename_all = "camelCase")]
    Leave { player_id: String },
    /// Updated team standings.
    Score {
        #[serde(default)]
        teams: Option<Vec<Team>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    PlayerLeave(LeaveNotice),
}

pub fn decode_inbound(raw: &str) -> Result<InboundMessage, AppError> {
    serde_json::from_str(raw)
        .map_err(|err| AppError::decode(format!("Unrecognised realtime message: {err}")))
}

pub fn encode_outbound(message: &OutboundMessage) -> Result<String, AppError> {
    serde_json::to_string(message)
        .map_err(|err| AppError::decode(format!("Failed to encode realtime message: {err}")))
}
