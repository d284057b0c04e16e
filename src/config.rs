//! Runtime configuration, read once from the environment at startup.

use crate::api::DEFAULT_BASE_URL;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use std::{env, path::PathBuf, str::FromStr};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SESSION_PATH: &str = "data/session.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the water-log backend.
    pub api_base_url: String,
    pub port: u16,
    /// JSON file backing the session store.
    pub session_path: PathBuf,
    /// Where one calendar day ends and the next begins.
    pub day_boundary: DayBoundary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            day_boundary: DayBoundary::Local,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let day_boundary = match lookup("DAY_BOUNDARY") {
            Some(value) => value.parse()?,
            None => defaults.day_boundary,
        };

        Ok(Self {
            api_base_url: lookup("API_BASE_URL")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            port: lookup("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            session_path: lookup("SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_path),
            day_boundary,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid DAY_BOUNDARY {0:?}: expected 'local', 'utc' or an offset like '+05:30'")]
    InvalidDayBoundary(String),
}

/// The timezone used to decide which calendar day a timestamp belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    /// The server's local timezone.
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl DayBoundary {
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.localize(instant).date_naive()
    }

    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        let offset = match self {
            DayBoundary::Local => instant.with_timezone(&Local).offset().fix(),
            DayBoundary::Utc => Utc.fix(),
            DayBoundary::Fixed(offset) => *offset,
        };
        instant.with_timezone(&offset)
    }
}

impl FromStr for DayBoundary {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(DayBoundary::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(DayBoundary::Utc);
        }
        parse_offset(trimmed)
            .map(DayBoundary::Fixed)
            .ok_or_else(|| ConfigError::InvalidDayBoundary(value.to_string()))
    }
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let sign = match value.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let (hours, minutes) = value[1..].split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
}
