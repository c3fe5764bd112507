//! Discord text limits and truncation helpers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Generic `truncate_to` shared by reminder text and list rendering
//! - 1.0.0: Initial message-limit truncation

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Truncate `text` to at most `max_bytes`, ending with "..." when cut
///
/// Never splits a UTF-8 character.
pub fn truncate_to(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    if max_bytes < 3 {
        return ".".repeat(max_bytes);
    }

    let mut end = max_bytes - 3; // Room for "..."
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit the message limit
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}
