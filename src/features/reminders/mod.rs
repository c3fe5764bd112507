//! # Reminders Feature
//!
//! Recurring task reminders: due-task selection, delivery over Discord DMs,
//! and the periodic tick that drives both.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Recurring tasks with snooze, sleep mode and bounded ticks
//! - 1.0.0: One-shot reminders

pub mod discord;
pub mod dispatcher;
pub mod due;
pub mod message;
pub mod model;
pub mod scheduler;
pub mod sleep_gate;
pub mod store;

pub use discord::DiscordMessenger;
pub use dispatcher::{DeliveryOutcome, Messenger, ReminderDispatcher};
pub use due::DueSelector;
pub use model::{minutes_from, Task, TaskStatus, User, MAX_INTERVAL_MINUTES};
pub use scheduler::{ReminderScheduler, TickOutcome, TickReport};
pub use sleep_gate::SleepGate;
pub use store::{StoreError, StoreResult, TaskStore, UserDirectory};
