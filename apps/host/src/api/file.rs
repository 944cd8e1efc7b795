//! Offline game data: the same JSON the game API returns, read from disk.

use std::path::Path;

use crate::domain::game_data::GameData;
use crate::error::AppError;

pub async fn read_game_file(path: &Path) -> Result<GameData, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| AppError::io(format!("Failed to read {}", path.display()), err))?;
    serde_json::from_str(&raw)
        .map_err(|err| AppError::decode(format!("Invalid game file {}: {err}", path.display())))
}
