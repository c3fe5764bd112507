//! Task and user records as the scheduler sees them

/// Longest accepted interval or snooze, ten years in minutes
pub const MAX_INTERVAL_MINUTES: i64 = 60 * 24 * 366 * 10;

/// `now` pushed forward by `minutes`
///
/// `None` when `minutes` is outside `1..=MAX_INTERVAL_MINUTES` or the sum
/// does not fit in an `i64`.
pub fn minutes_from(now: i64, minutes: i64) -> Option<i64> {
    if !(1..=MAX_INTERVAL_MINUTES).contains(&minutes) {
        return None;
    }
    now.checked_add(minutes.checked_mul(60)?)
}

/// Lifecycle state of a task. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Active,
    Done,
}

impl TaskStatus {
    /// Integer encoding used by the tasks table
    pub fn as_db(self) -> i64 {
        match self {
            Self::Active => 1,
            Self::Done => 0,
        }
    }

    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Active),
            0 => Some(Self::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Discord user id; doubles as the delivery address
    pub external_id: i64,
    pub username: Option<String>,
    /// Display-only, never consulted by the scheduler
    pub timezone: String,
    pub is_sleeping: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub note: Option<String>,
    pub status: TaskStatus,
    pub next_reminder_at: i64,
    pub interval_minutes: i64,
    pub paused_until: Option<i64>,
}

impl Task {
    /// Due predicate: active, reached, and not held by a pending snooze
    pub fn is_due(&self, now: i64) -> bool {
        self.status == TaskStatus::Active
            && self.next_reminder_at <= now
            && self.paused_until.map_or(true, |until| until <= now)
    }

    /// Next reminder time one interval after `now`; `None` for an out-of-range interval
    pub fn next_after(&self, now: i64) -> Option<i64> {
        minutes_from(now, self.interval_minutes)
    }
}
