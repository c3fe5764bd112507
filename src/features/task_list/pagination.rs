//! Page arithmetic and the list callback protocol
//!
//! Callback ids are `|`-separated, e.g. `task_snooze|42|60|1|5`.

/// Number of pages needed for `total` rows at `limit` per page
pub fn page_count(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Clamp a requested page into `[0, pages - 1]`
pub fn clamp_page(page: i64, pages: i64) -> i64 {
    if pages <= 0 {
        return 0;
    }
    page.clamp(0, pages - 1)
}

/// A button press on the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Page { page: i64, limit: i64 },
    Select { task_id: i64, page: i64, limit: i64 },
    Done { task_id: i64, page: i64, limit: i64 },
    Snooze { task_id: i64, minutes: i64, page: i64, limit: i64 },
    Delete { task_id: i64, page: i64, limit: i64 },
    Back { page: i64, limit: i64 },
}

impl ListAction {
    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split('|');
        let kind = parts.next()?;
        let numbers: Vec<i64> = parts.map(|p| p.parse().ok()).collect::<Option<_>>()?;

        let action = match (kind, numbers.as_slice()) {
            ("list_page", &[page, limit]) => Self::Page { page, limit },
            ("select_task", &[task_id, page, limit]) => Self::Select { task_id, page, limit },
            ("task_done", &[task_id, page, limit]) => Self::Done { task_id, page, limit },
            ("task_snooze", &[task_id, minutes, page, limit]) => Self::Snooze {
                task_id,
                minutes,
                page,
                limit,
            },
            ("task_delete", &[task_id, page, limit]) => Self::Delete { task_id, page, limit },
            ("back_to_list", &[page, limit]) => Self::Back { page, limit },
            _ => return None,
        };
        Some(action)
    }

    pub fn to_custom_id(&self) -> String {
        match *self {
            Self::Page { page, limit } => format!("list_page|{page}|{limit}"),
            Self::Select { task_id, page, limit } => format!("select_task|{task_id}|{page}|{limit}"),
            Self::Done { task_id, page, limit } => format!("task_done|{task_id}|{page}|{limit}"),
            Self::Snooze {
                task_id,
                minutes,
                page,
                limit,
            } => format!("task_snooze|{task_id}|{minutes}|{page}|{limit}"),
            Self::Delete { task_id, page, limit } => format!("task_delete|{task_id}|{page}|{limit}"),
            Self::Back { page, limit } => format!("back_to_list|{page}|{limit}"),
        }
    }

    /// Whether this id belongs to the list protocol at all
    pub fn is_list_id(custom_id: &str) -> bool {
        const PREFIXES: [&str; 6] = [
            "list_page|",
            "select_task|",
            "task_done|",
            "task_snooze|",
            "task_delete|",
            "back_to_list|",
        ];
        PREFIXES.iter().any(|p| custom_id.starts_with(p))
    }
}
