//! Task list rendering: message text plus a button layout
//!
//! Pure data in, pure data out. Turning the layout into Discord components
//! happens in `message_components`.

use super::interval::format_interval;
use super::pagination::{clamp_page, page_count, ListAction};
use crate::core::truncate_for_message;
use crate::features::reminders::Task;

pub const DEFAULT_PAGE_SIZE: i64 = 5;
/// Keeps numbered buttons within Discord's five action rows
pub const MAX_PAGE_SIZE: i64 = 20;
/// Discord allows five buttons per action row
const BUTTONS_PER_ROW: usize = 5;

/// Snooze choices offered on a selected task, in minutes
pub const SNOOZE_CHOICES: [(i64, &str); 3] = [(15, "⏱ +15m"), (60, "⏱ +1h"), (1440, "⏱ +1d")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListButton {
    pub label: String,
    pub action: ListAction,
    pub kind: ButtonKind,
}

impl ListButton {
    fn new(label: impl Into<String>, action: ListAction, kind: ButtonKind) -> Self {
        Self {
            label: label.into(),
            action,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub text: String,
    pub button_rows: Vec<Vec<ListButton>>,
}

/// Which slice of the open tasks a page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub page: i64,
    pub pages: i64,
    pub limit: i64,
    pub total: i64,
}

impl ListWindow {
    /// Normalize a requested page against the current open-task count
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE)
        };
        let pages = page_count(total, limit);
        Self {
            page: clamp_page(page, pages),
            pages,
            limit,
            total: total.max(0),
        }
    }

    pub fn offset(&self) -> i64 {
        self.page * self.limit
    }
}

/// Render epoch seconds as `YYYY-MM-DD HH:MM` UTC
pub fn format_ts(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string())
}

pub fn build_list_view(window: ListWindow, rows: &[Task], selected: Option<i64>) -> ListView {
    if window.total == 0 {
        return ListView {
            text: "📭 No tasks yet. Add one with `/add`.".to_string(),
            button_rows: Vec::new(),
        };
    }

    let ListWindow {
        page, pages, limit, ..
    } = window;

    let mut lines = vec![
        "🗒️ **My tasks**".to_string(),
        format!("Page {} of {}", page + 1, pages),
        format!("Total: {}", window.total),
        String::new(),
    ];

    for (i, task) in rows.iter().enumerate() {
        let prefix = if selected == Some(task.id) { "→ " } else { "" };
        let mut entry = vec![
            format!("{prefix}{}) **{}** · #{}", i + 1, task.name, task.id),
            format!("   Next reminder: {} UTC", format_ts(task.next_reminder_at)),
            format!("   Interval: {}", format_interval(task.interval_minutes)),
        ];
        if let Some(note) = &task.note {
            entry.push(format!("   Note: {note}"));
        }
        if let Some(until) = task.paused_until {
            entry.push(format!("   Snoozed until: {} UTC", format_ts(until)));
        }
        lines.push(entry.join("\n"));
    }

    let mut button_rows: Vec<Vec<ListButton>> = Vec::new();

    match selected {
        None => {
            let numbers: Vec<ListButton> = rows
                .iter()
                .enumerate()
                .map(|(i, task)| {
                    ListButton::new(
                        (i + 1).to_string(),
                        ListAction::Select {
                            task_id: task.id,
                            page,
                            limit,
                        },
                        ButtonKind::Secondary,
                    )
                })
                .collect();
            button_rows.extend(numbers.chunks(BUTTONS_PER_ROW).map(<[_]>::to_vec));
        }
        Some(task_id) => {
            button_rows.push(vec![ListButton::new(
                "✅ Done",
                ListAction::Done {
                    task_id,
                    page,
                    limit,
                },
                ButtonKind::Success,
            )]);
            button_rows.push(
                SNOOZE_CHOICES
                    .iter()
                    .map(|&(minutes, label)| {
                        ListButton::new(
                            label,
                            ListAction::Snooze {
                                task_id,
                                minutes,
                                page,
                                limit,
                            },
                            ButtonKind::Primary,
                        )
                    })
                    .collect(),
            );
            button_rows.push(vec![
                ListButton::new(
                    "🗑 Delete",
                    ListAction::Delete {
                        task_id,
                        page,
                        limit,
                    },
                    ButtonKind::Danger,
                ),
                ListButton::new(
                    "↩️ Back",
                    ListAction::Back { page, limit },
                    ButtonKind::Secondary,
                ),
            ]);
        }
    }

    let mut nav = Vec::new();
    if page > 0 {
        nav.push(ListButton::new(
            "⬅️ Prev",
            ListAction::Page {
                page: page - 1,
                limit,
            },
            ButtonKind::Secondary,
        ));
    }
    if page < pages - 1 {
        nav.push(ListButton::new(
            "Next ➡️",
            ListAction::Page {
                page: page + 1,
                limit,
            },
            ButtonKind::Secondary,
        ));
    }
    if !nav.is_empty() {
        button_rows.push(nav);
    }

    ListView {
        text: truncate_for_message(&lines.join("\n")),
        button_rows,
    }
}
