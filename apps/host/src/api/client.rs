//! HTTP client for the game API: game-data fetch and score commits.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::HostConfig;
use crate::domain::events::{LeaveNotice, ScoreCommit};
use crate::domain::game_data::GameData;
use crate::error::AppError;
use crate::protocol::{encode_outbound, OutboundMessage};
use crate::runtime::sink::SessionSink;

#[derive(Debug, Clone)]
pub struct GameApi {
    http: Client,
    base_url: String,
    /// Encoded realtime messages, handed to whatever owns the socket.
    outbound: Option<mpsc::UnboundedSender<String>>,
}

impl GameApi {
    pub fn new(config: &HostConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| AppError::transport("Failed to build HTTP client", err))?;
        Ok(Self {
            http,
            base_url: config.api_base.clone(),
            outbound: None,
        })
    }

    /// Forward leave announcements to a realtime transport.
    pub fn with_outbound(mut self, outbound: mpsc::UnboundedSender<String>) -> Self {
        self.outbound = Some(outbound);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/game/{id}`. Validation is left to the session.
    pub async fn fetch_game(&self, game_id: &str) -> Result<GameData, AppError> {
        let url = format!("{}/game/{}", self.base_url, game_id);
        debug!(%url, "Fetching game data");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| AppError::transport(format!("GET {url} failed"), err))?;
        let response = ensure_success(response).await?;

        let mut data: GameData = response
            .json()
            .await
            .map_err(|err| AppError::decode(format!("Invalid game data from {url}: {err}")))?;
        if data.id.is_empty() {
            data.id = game_id.to_string();
        }

        info!(
            game_id = %data.id,
            teams = data.teams.len(),
            words = data.words.len(),
            "Game data fetched"
        );
        Ok(data)
    }

    /// `POST {base}/game/score?gameId=..&playerId=..`. One call per point.
    pub async fn post_score(&self, commit: &ScoreCommit) -> Result<(), AppError> {
        let url = format!("{}/game/score", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[
                ("gameId", commit.game_id.as_str()),
                ("playerId", commit.contestant_id.as_str()),
            ])
            .send()
            .await
            .map_err(|err| AppError::transport(format!("POST {url} failed"), err))?;
        ensure_success(response).await?;

        debug!(
            game_id = %commit.game_id,
            contestant_id = %commit.contestant_id,
            "Score committed"
        );
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .text()
        .await
        .unwrap_or_else(|_| "(no body)".to_string());
    Err(AppError::Http {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl SessionSink for GameApi {
    async fn commit_score(&self, commit: &ScoreCommit) -> Result<(), AppError> {
        self.post_score(commit).await
    }

    async fn announce_leave(&self, notice: &LeaveNotice) -> Result<(), AppError> {
        let Some(outbound) = &self.outbound else {
            debug!(game_id = %notice.game_id, "No realtime transport; leave not forwarded");
            return Ok(());
        };
        let encoded = encode_outbound(&OutboundMessage::PlayerLeave(notice.clone()))?;
        outbound.send(encoded).map_err(|_| AppError::Disconnected {
            detail: "leave notice dropped".to_string(),
        })
    }
}
