//! # Core Module
//!
//! Configuration, time source, and message limits shared by every layer.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add clock module so scheduling can run against an injected time source
//! - 1.0.0: Initial creation with config module

pub mod clock;
pub mod config;
pub mod response;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use response::{truncate_for_message, MESSAGE_LIMIT};
