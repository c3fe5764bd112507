//! Discord DM delivery

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::id::UserId;
use std::sync::Arc;

use super::dispatcher::Messenger;

/// Sends reminders as direct messages; the address is the Discord user id
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, address: i64, text: &str) -> Result<()> {
        let http: &Http = &self.http;
        let user = UserId(u64::try_from(address)?);
        let dm = user.create_dm_channel(http).await?;
        dm.send_message(http, |m| m.content(text)).await?;
        debug!("Sent DM to {user}");
        Ok(())
    }
}
