use crate::commands::handlers::create_all_handlers;
use crate::commands::{CommandContext, SlashCommandHandler};
use anyhow::Result;
use log::{debug, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::Instant;
use uuid::Uuid;

/// Routes slash commands to their registered handlers
#[derive(Clone)]
pub struct CommandHandler {
    context: Arc<CommandContext>,
    handlers: Arc<HashMap<&'static str, Arc<dyn SlashCommandHandler>>>,
}

impl CommandHandler {
    pub fn new(context: Arc<CommandContext>) -> Self {
        let handlers = index_by_name(create_all_handlers());
        info!("Routing {} slash command names", handlers.len());

        CommandHandler {
            context,
            handlers: Arc::new(handlers),
        }
    }

    fn handler_for(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = command.user.id.to_string();
        let channel_id = command.channel_id.to_string();
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{}] 📥 Slash command received | Command: {} | User: {} | Channel: {} | Guild: {}",
            request_id, command.data.name, user_id, channel_id, guild_id
        );

        let Some(handler) = self.handler_for(&command.data.name) else {
            warn!("[{}] ❓ Unknown slash command: {}", request_id, command.data.name);
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content("Unknown command. Use `/start` to see available commands.")
                        })
                })
                .await?;
            return Ok(());
        };

        let started = Instant::now();
        handler.handle(self.context.clone(), ctx, command).await?;
        debug!(
            "[{request_id}] ✅ /{} handled in {:?}",
            command.data.name,
            started.elapsed()
        );

        Ok(())
    }
}

/// Map every declared command name to its handler; a later handler wins a clash
fn index_by_name(
    handlers: Vec<Arc<dyn SlashCommandHandler>>,
) -> HashMap<&'static str, Arc<dyn SlashCommandHandler>> {
    let mut by_name = HashMap::new();
    for handler in handlers {
        for &name in handler.command_names() {
            if by_name.insert(name, Arc::clone(&handler)).is_some() {
                warn!("Slash command /{name} claimed by more than one handler");
            }
        }
    }
    by_name
}
