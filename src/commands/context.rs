//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Task store and list page size only
//! - 1.0.0: Initial implementation with core shared state

use anyhow::Result;
use serenity::model::user::User as DiscordUser;

use crate::database::Database;
use crate::features::reminders::{User, UserDirectory};

/// Shared context for all command and component handlers
#[derive(Clone)]
pub struct CommandContext {
    pub database: Database,
    /// Tasks shown per `/list` page
    pub list_page_size: i64,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(database: Database, list_page_size: i64) -> Self {
        Self {
            database,
            list_page_size,
            start_time: std::time::Instant::now(),
        }
    }

    /// Map the interacting Discord account onto a stored user, creating it on first contact
    pub async fn resolve_user(&self, discord_user: &DiscordUser) -> Result<User> {
        let external_id = i64::try_from(discord_user.id.0)?;
        let user = self
            .database
            .get_or_create_user(external_id, Some(&discord_user.name))
            .await?;
        Ok(user)
    }
}
