// Core layer - shared types and configuration
pub mod core;

// Features layer - reminder engine and task list
pub mod features;

// UI components
pub mod message_components;

// Persistence
pub mod database;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::Config;

pub use features::ReminderScheduler;
