use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub record_api_url: String,
    pub api_prefix: String,
    pub request_timeout: Duration,

    // Record store fetch sizes
    pub employee_fetch_limit: u32,
    pub event_fetch_limit: Option<u32>,

    // Attendance sessions
    pub session_ttl: Duration,
    pub max_sessions: u64,

    pub rate_per_min: u32,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key source; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rate_per_min: u32 = parse_or(&lookup, "RATE_PER_MIN", 1000)?;
        if rate_per_min == 0 {
            bail!("RATE_PER_MIN must be greater than zero");
        }

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").context("SERVER_ADDR must be set")?,
            record_api_url: lookup("RECORD_API_URL").context("RECORD_API_URL must be set")?,
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),

            employee_fetch_limit: parse_or(&lookup, "EMPLOYEE_FETCH_LIMIT", 100)?,
            event_fetch_limit: parse_opt(&lookup, "EVENT_FETCH_LIMIT")?,

            session_ttl: Duration::from_secs(parse_or(&lookup, "SESSION_TTL_SECS", 1800)?), // default 30 min
            max_sessions: parse_or(&lookup, "MAX_SESSIONS", 10_000)?,

            rate_per_min,
            log_level: parse_or(&lookup, "LOG_LEVEL", Level::DEBUG)?,
        })
    }
}

fn parse_opt<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e)),
        _ => Ok(None),
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
