//! Utility command handlers
//!
//! Handles: start
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Single /start greeting that registers the user
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;

const START_TEXT: &str = r#"👋 **Hi! I send you recurring reminders by DM.**

`/add name interval [note]` - Add a task (e.g. `/add Stretch 45m`)
`/list` - Browse your tasks; mark done, snooze or delete with the buttons
`/snooze task duration` - Push a task back (e.g. `/snooze 3 1h`)
`/interval task value` - Change how often a task repeats
`/sleep` / `/awake` - Pause and resume all reminders

Intervals accept minutes (`90`) or units: `30m`, `2h`, `1d`, `1w`, `1h30m`."#;

/// Handler for /start
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user = ctx.resolve_user(&command.user).await?;
        info!(
            "Start command from {} (user {}, uptime {:?})",
            command.user.name,
            user.id,
            ctx.start_time.elapsed()
        );

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(START_TEXT))
            })
            .await?;

        Ok(())
    }
}
