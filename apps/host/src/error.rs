use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Game API returned {status}: {detail}")]
    Http { status: u16, detail: String },
    #[error("Transport error: {detail}")]
    Transport {
        detail: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Decode error: {detail}")]
    Decode { detail: String },
    #[error("I/O error: {detail}")]
    Io {
        detail: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Realtime channel closed: {detail}")]
    Disconnected { detail: String },
    #[error("Session task is no longer running")]
    SessionClosed,
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            detail: detail.into(),
            source,
        }
    }

    pub fn io(detail: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            detail: detail.into(),
            source,
        }
    }

    /// Stable machine-readable code, used in operator notices and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Http { .. } => "HTTP_STATUS",
            AppError::Transport { .. } => "TRANSPORT",
            AppError::Decode { .. } => "DECODE",
            AppError::Io { .. } => "IO",
            AppError::Domain(DomainError::Validation(..)) => "INVALID_GAME_DATA",
            AppError::Domain(DomainError::PhaseMismatch { .. }) => "PHASE_MISMATCH",
            AppError::Disconnected { .. } => "DISCONNECTED",
            AppError::SessionClosed => "SESSION_CLOSED",
        }
    }
}
