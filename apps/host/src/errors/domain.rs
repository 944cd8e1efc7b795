//! Engine-level error type.
//!
//! This error type is transport-agnostic. Adapters and the session runtime
//! return `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::session::Phase;

/// Reasons game data is rejected before a session can leave `AwaitingData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    MissingGameId,
    MissingTeams,
    EmptyTeam,
    MissingWords,
    InvalidPlayersPerTeam,
}

/// Central engine error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Game data is missing or malformed
    Validation(ValidationKind, String),
    /// A command arrived in a phase that does not accept it
    PhaseMismatch { action: &'static str, phase: Phase },
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "invalid game data {kind:?}: {d}"),
            DomainError::PhaseMismatch { action, phase } => {
                write!(f, "{action} is not allowed while {phase:?}")
            }
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn phase_mismatch(action: &'static str, phase: Phase) -> Self {
        Self::PhaseMismatch { action, phase }
    }

    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            DomainError::PhaseMismatch { .. } => None,
        }
    }
}
