//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 3.0.0: TaskHandler (add, list, interval, snooze) and SleepHandler (sleep, awake)
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod sleep;
pub mod tasks;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// `CommandHandler` indexes these by the names each one declares.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(tasks::TaskHandler),
        Arc::new(sleep::SleepHandler),
    ]
}
