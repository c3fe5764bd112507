//! # Task List Feature
//!
//! Pure helpers behind the Discord front-end: interval parsing, page
//! arithmetic, the button callback protocol, and list rendering.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod interval;
pub mod pagination;
pub mod view;

pub use interval::{format_interval, parse_interval};
pub use pagination::{clamp_page, page_count, ListAction};
pub use view::{build_list_view, format_ts, ButtonKind, ListButton, ListView, ListWindow};
