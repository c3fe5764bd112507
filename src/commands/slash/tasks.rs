//! Task slash commands: /start, /add, /list, /sleep, /awake, /interval, /snooze

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates task commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_start_command(),
        create_add_command(),
        create_list_command(),
        create_sleep_command(),
        create_awake_command(),
        create_interval_command(),
        create_snooze_command(),
    ]
}

fn create_start_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("start")
        .description("Introduce the bot and register yourself")
        .to_owned()
}

/// Creates the add command - new recurring task
fn create_add_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("add")
        .description("Add a recurring task")
        .create_option(|option| {
            option
                .name("name")
                .description("What to remind you about")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("interval")
                .description("How often (e.g. 30, 45m, 2h, 1d, 1h30m)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("note")
                .description("Optional note shown with the reminder")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .to_owned()
}

fn create_list_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("list")
        .description("Show your open tasks")
        .to_owned()
}

fn create_sleep_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("sleep")
        .description("Pause all reminders until /awake")
        .to_owned()
}

fn create_awake_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("awake")
        .description("Resume reminders")
        .to_owned()
}

/// Creates the interval command - change how often a task repeats
fn create_interval_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("interval")
        .description("Change how often a task reminds you")
        .create_option(|option| {
            option
                .name("task")
                .description("Task number (shown as #id in /list)")
                .kind(CommandOptionType::Integer)
                .required(true)
                .min_int_value(1)
        })
        .create_option(|option| {
            option
                .name("value")
                .description("New interval (e.g. 90, 2h, 1d)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .to_owned()
}

/// Creates the snooze command - push a task's next reminder back
fn create_snooze_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("snooze")
        .description("Snooze a task")
        .create_option(|option| {
            option
                .name("task")
                .description("Task number (shown as #id in /list)")
                .kind(CommandOptionType::Integer)
                .required(true)
                .min_int_value(1)
        })
        .create_option(|option| {
            option
                .name("duration")
                .description("How long to snooze (e.g. 15m, 1h, 1d)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .to_owned()
}
