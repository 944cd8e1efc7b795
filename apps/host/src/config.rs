use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "http://localhost:3001/api";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

/// Host process settings. Game rules are constants and not configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Base URL of the game API, without a trailing slash.
    pub api_base: String,
    pub http_timeout: Duration,
    /// Fixed seed for word draws; `None` draws from OS entropy.
    pub word_seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            word_seed: None,
        }
    }
}

impl HostConfig {
    /// Read `ASSOCIATIONS_API_BASE`, `ASSOCIATIONS_HTTP_TIMEOUT_MS` and
    /// `ASSOCIATIONS_WORD_SEED`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("ASSOCIATIONS_API_BASE") {
            config.api_base = normalize_base(&base)?;
        }
        if let Some(raw) = lookup("ASSOCIATIONS_HTTP_TIMEOUT_MS") {
            let ms = parse_var::<u64>("ASSOCIATIONS_HTTP_TIMEOUT_MS", &raw)?;
            if ms == 0 {
                return Err(AppError::config(
                    "ASSOCIATIONS_HTTP_TIMEOUT_MS must be greater than zero",
                ));
            }
            config.http_timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("ASSOCIATIONS_WORD_SEED") {
            config.word_seed = Some(parse_var::<u64>("ASSOCIATIONS_WORD_SEED", &raw)?);
        }

        Ok(config)
    }

    pub fn with_api_base(mut self, base: &str) -> Result<Self, AppError> {
        self.api_base = normalize_base(base)?;
        Ok(self)
    }
}

fn normalize_base(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AppError::config("API base URL is empty"));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::config(format!(
            "API base URL must start with http:// or https://, got '{trimmed}'"
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::config(format!("Environment variable '{name}' is invalid: '{raw}'")))
}
