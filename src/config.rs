//! Process configuration from environment variables.
//!
//! - `BIND_ADDR`: listen address, default `0.0.0.0`
//! - `PORT`: default 3000
//! - `SEED`: u64; makes demo seat statuses reproducible
//! - `DEMO_FIXED_STATUS`: `Available` / `Occupied` / `Booked` / `Pending`;
//!   every demo seat starts with that status (takes precedence over `SEED`)
//! - `SUGGESTION_MAX_TOKENS`: default 512

use std::str::FromStr;

use crate::layout::SeatStatus;
use crate::layout::seed::StatusSource;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SUGGESTION_MAX_TOKENS: u32 = 512;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub seed: Option<u64>,
    pub fixed_status: Option<SeatStatus>,
    pub suggestion_max_tokens: u32,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a present value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let fixed_status = match lookup("DEMO_FIXED_STATUS") {
            Some(raw) => Some(
                SeatStatus::parse(&raw).ok_or(ConfigError::Invalid { key: "DEMO_FIXED_STATUS", value: raw })?,
            ),
            None => None,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            port: parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT),
            seed: parse_var(&lookup, "SEED")?,
            fixed_status,
            suggestion_max_tokens: parse_var(&lookup, "SUGGESTION_MAX_TOKENS")?
                .unwrap_or(DEFAULT_SUGGESTION_MAX_TOKENS),
        })
    }

    /// Where demo seat statuses come from.
    #[must_use]
    pub fn status_source(&self) -> StatusSource {
        match (self.fixed_status, self.seed) {
            (Some(status), _) => StatusSource::Fixed(status),
            (None, Some(seed)) => StatusSource::seeded(seed),
            (None, None) => StatusSource::from_os(),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ConfigError::Invalid { key, value: raw }),
        },
        None => Ok(None),
    }
}

/// Parse an env var, falling back to `default` when unset or malformed.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
