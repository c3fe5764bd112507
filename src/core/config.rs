//! Runtime configuration loaded from the environment
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Scheduler cadence and batch limit are configurable
//! - 1.0.0: Initial release with Discord token and database path

use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_PATH: &str = "nudge.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TICK_PERIOD_SECS: u64 = 15;
pub const DEFAULT_BATCH_LIMIT: usize = 50;
pub const DEFAULT_LIST_PAGE_SIZE: i64 = 5;
pub const DEFAULT_TIMEZONE: &str = "Europe/Warsaw";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Development mode: register commands for this guild only
    pub discord_guild_id: Option<String>,
    pub database_path: String,
    pub log_level: String,
    pub tick_period_secs: u64,
    pub batch_limit: usize,
    pub list_page_size: i64,
    pub default_timezone: String,
}

impl Config {
    /// Load configuration from process environment variables
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?;

        let discord_guild_id = lookup("DISCORD_GUILD_ID").filter(|id| !id.trim().is_empty());

        let database_path =
            lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let default_timezone =
            lookup("DEFAULT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        let tick_period_secs =
            parse_positive(&lookup, "TICK_PERIOD_SECS", DEFAULT_TICK_PERIOD_SECS)?;
        let batch_limit = parse_positive(&lookup, "BATCH_LIMIT", DEFAULT_BATCH_LIMIT)?;
        let list_page_size = parse_positive(&lookup, "LIST_PAGE_SIZE", DEFAULT_LIST_PAGE_SIZE)?;

        Ok(Config {
            discord_token,
            discord_guild_id,
            database_path,
            log_level,
            tick_period_secs,
            batch_limit,
            list_page_size,
            default_timezone,
        })
    }

    /// Tick period and per-tick batch limit for the reminder scheduler
    pub fn scheduler_settings(&self) -> (Duration, usize) {
        (Duration::from_secs(self.tick_period_secs), self.batch_limit)
    }
}

fn parse_positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: T = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} is not a valid number: {raw:?}"))?;
    if value <= T::default() {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}
