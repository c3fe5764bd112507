//! The seam between slash command routing and per-command logic

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;

/// One group of related slash commands
///
/// `command_names` must list every name `handle` answers to; routing looks
/// handlers up by those names only. `handle` owns the interaction response,
/// including user-facing rejections. An `Err` means the bot failed and the
/// caller sends a generic error reply.
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    fn command_names(&self) -> &'static [&'static str];

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()>;
}
