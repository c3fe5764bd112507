//! Sleep mode handlers
//!
//! Handles: sleep, awake

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::features::reminders::SleepGate;

/// Handler for the per-user sleep flag
pub struct SleepHandler;

#[async_trait]
impl SlashCommandHandler for SleepHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["sleep", "awake"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let sleeping = command.data.name == "sleep";
        let user = ctx.resolve_user(&command.user).await?;
        ctx.database.set_sleeping(user.id, sleeping).await?;
        info!("User {} sleep mode: {sleeping}", user.id);

        let reply = if sleeping {
            "😴 Sleep mode on. Reminders are paused until you use `/awake`."
        } else {
            "☀️ Welcome back! Reminders are running again."
        };

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(reply))
            })
            .await?;

        Ok(())
    }
}
