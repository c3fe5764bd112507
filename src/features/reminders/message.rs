//! Reminder message text

use crate::core::truncate_for_message;

/// Render the reminder body for one task
pub fn compose_reminder(name: &str, note: Option<&str>) -> String {
    let mut text = format!("🔔 Reminder: **{name}**");
    if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
        text.push('\n');
        text.push_str(note);
    }
    truncate_for_message(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MESSAGE_LIMIT;

    #[test]
    fn test_name_only() {
        assert_eq!(compose_reminder("Stretch", None), "🔔 Reminder: **Stretch**");
        assert_eq!(compose_reminder("Stretch", Some("  ")), "🔔 Reminder: **Stretch**");
    }

    #[test]
    fn test_note_on_second_line() {
        let text = compose_reminder("Pay rent", Some("IBAN in the shared doc"));
        assert_eq!(text, "🔔 Reminder: **Pay rent**\nIBAN in the shared doc");
    }

    #[test]
    fn test_long_note_truncated() {
        let note = "x".repeat(5000);
        let text = compose_reminder("Read", Some(&note));
        assert!(text.len() <= MESSAGE_LIMIT);
        assert!(text.starts_with("🔔 Reminder: **Read**\n"));
    }
}
