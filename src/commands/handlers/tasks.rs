//! Task command handlers
//!
//! Handles: add, list, interval, snooze
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 2.0.0: Recurring tasks replace one-shot reminders
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{get_integer_option, get_string_option};
use crate::database::Database;
use crate::features::reminders::TaskStore;
use crate::features::task_list::{format_interval, format_ts, parse_interval};
use crate::message_components::{list_components, load_list_view};

const INTERVAL_HINT: &str =
    "❌ Invalid interval. Use minutes (`90`) or units like `30m`, `2h`, `1d`, `1w`, `1h30m`, up to 10 years.";

/// Longest task name accepted by `/add`
const MAX_NAME_CHARS: usize = 200;

/// Handler for task commands
pub struct TaskHandler;

#[async_trait]
impl SlashCommandHandler for TaskHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["add", "list", "interval", "snooze"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "add" => self.handle_add(&ctx, serenity_ctx, command).await,
            "list" => self.handle_list(&ctx, serenity_ctx, command).await,
            "interval" => self.handle_interval(&ctx, serenity_ctx, command).await,
            "snooze" => self.handle_snooze(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl TaskHandler {
    /// Handle /add command - create a recurring task
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let name = get_string_option(&command.data.options, "name")
            .ok_or_else(|| anyhow!("Missing name parameter"))?;
        let interval_str = get_string_option(&command.data.options, "interval")
            .ok_or_else(|| anyhow!("Missing interval parameter"))?;
        let note = get_string_option(&command.data.options, "note");

        let (name, minutes) = match validate_new_task(&name, &interval_str) {
            Ok(valid) => valid,
            Err(rejection) => return respond(serenity_ctx, command, rejection, true).await,
        };

        let user = ctx.resolve_user(&command.user).await?;
        let reply = add_task_reply(&ctx.database, user.id, name, note.as_deref(), minutes).await?;
        respond(serenity_ctx, command, &reply, false).await
    }

    /// Handle /list command - first page of open tasks
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user = ctx.resolve_user(&command.user).await?;
        let view = load_list_view(&ctx.database, user.id, 0, ctx.list_page_size, None).await?;

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message
                            .content(&view.text)
                            .set_components(list_components(&view))
                    })
            })
            .await?;

        Ok(())
    }

    /// Handle /interval command - change the repeat interval
    async fn handle_interval(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let task_id = get_integer_option(&command.data.options, "task")
            .ok_or_else(|| anyhow!("Missing task parameter"))?;
        let value = get_string_option(&command.data.options, "value")
            .ok_or_else(|| anyhow!("Missing value parameter"))?;

        let Some(minutes) = parse_interval(&value) else {
            return respond(serenity_ctx, command, INTERVAL_HINT, true).await;
        };

        let user = ctx.resolve_user(&command.user).await?;
        let reply = if ctx.database.set_interval(task_id, user.id, minutes).await? {
            info!("User {} set task {task_id} interval to {minutes}m", user.id);
            format!(
                "🔁 Task #{task_id} now repeats every **{}**.",
                format_interval(minutes)
            )
        } else {
            format!("❌ Task #{task_id} not found.")
        };

        respond(serenity_ctx, command, &reply, false).await
    }

    /// Handle /snooze command - pause a task for a while
    async fn handle_snooze(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let task_id = get_integer_option(&command.data.options, "task")
            .ok_or_else(|| anyhow!("Missing task parameter"))?;
        let duration = get_string_option(&command.data.options, "duration")
            .ok_or_else(|| anyhow!("Missing duration parameter"))?;

        let Some(minutes) = parse_interval(&duration) else {
            return respond(serenity_ctx, command, INTERVAL_HINT, true).await;
        };

        let user = ctx.resolve_user(&command.user).await?;
        let reply = snooze_reply(&ctx.database, user.id, task_id, minutes).await?;

        respond(serenity_ctx, command, &reply, false).await
    }
}

/// Store a new task and describe its first reminder as the store scheduled it
async fn add_task_reply(
    database: &Database,
    user_id: i64,
    name: &str,
    note: Option<&str>,
    minutes: i64,
) -> Result<String> {
    let task_id = database.add_task(user_id, name, note, minutes).await?;
    let task = database
        .get_task(task_id, user_id)
        .await?
        .ok_or_else(|| anyhow!("Task {task_id} vanished right after insert"))?;

    info!(
        "Created task {task_id} for user {user_id} every {}",
        format_interval(minutes)
    );

    Ok(format!(
        "✅ Added **{}** (#{task_id}), every **{}**.\nFirst reminder: {} UTC",
        task.name,
        format_interval(task.interval_minutes),
        format_ts(task.next_reminder_at)
    ))
}

async fn snooze_reply(
    database: &Database,
    user_id: i64,
    task_id: i64,
    minutes: i64,
) -> Result<String> {
    if !database.snooze(task_id, user_id, minutes).await? {
        return Ok(format!("❌ Task #{task_id} not found."));
    }
    let until = database
        .get_task(task_id, user_id)
        .await?
        .and_then(|task| task.paused_until);

    Ok(match until {
        Some(until) => format!(
            "😴 Task #{task_id} snoozed for **{}** (until {} UTC).",
            format_interval(minutes),
            format_ts(until)
        ),
        None => format!("😴 Task #{task_id} snoozed for **{}**.", format_interval(minutes)),
    })
}

/// Check `/add` input, returning the trimmed name and interval in minutes
fn validate_new_task<'a>(name: &'a str, interval: &str) -> Result<(&'a str, i64), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("❌ Task name cannot be empty.");
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err("❌ Task name is too long (200 characters max).");
    }
    let minutes = parse_interval(interval).ok_or(INTERVAL_HINT)?;
    Ok((name, minutes))
}

async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: &str,
    ephemeral: bool,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content).ephemeral(ephemeral))
        })
        .await?;
    Ok(())
}
