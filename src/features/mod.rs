//! # Features
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Task list front-end helpers; reminders rebuilt around recurring tasks
//! - 1.0.0: Initial feature layout

pub mod reminders;
pub mod task_list;

pub use reminders::ReminderScheduler;
