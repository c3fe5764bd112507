//! Storage seams consumed by the scheduler and the command handlers
//!
//! `Database` implements all three traits; tests can swap any of them.

use async_trait::async_trait;
use thiserror::Error;

use super::model::{Task, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("SQLite error: {0}")]
    Database(#[from] sqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Task persistence
///
/// Mutators match on task id AND owner id. `Ok(false)` means no row matched
/// (missing or owned by someone else), or the request was rejected before
/// touching the store.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create an active task due one interval from now
    async fn add_task(
        &self,
        user_id: i64,
        name: &str,
        note: Option<&str>,
        interval_minutes: i64,
    ) -> StoreResult<i64>;

    /// Due tasks, earliest `next_reminder_at` first, at most `limit`
    async fn get_due(&self, now: i64, limit: i64, user_id: Option<i64>) -> StoreResult<Vec<Task>>;

    async fn mark_done(&self, task_id: i64, owner_id: i64) -> StoreResult<bool>;

    /// Soft delete; identical to `mark_done`
    async fn delete_task(&self, task_id: i64, owner_id: i64) -> StoreResult<bool>;

    async fn snooze(&self, task_id: i64, owner_id: i64, minutes: i64) -> StoreResult<bool>;

    /// Move `next_reminder_at` to a strictly future `next_ts` and clear any snooze
    async fn reschedule(&self, task_id: i64, owner_id: i64, next_ts: i64) -> StoreResult<bool>;

    async fn set_interval(&self, task_id: i64, owner_id: i64, minutes: i64) -> StoreResult<bool>;

    async fn count_open(&self, user_id: i64) -> StoreResult<i64>;

    async fn list_open_paged(&self, user_id: i64, offset: i64, limit: i64)
        -> StoreResult<Vec<Task>>;
}

/// User identity lookups
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_or_create_user(
        &self,
        external_id: i64,
        username: Option<&str>,
    ) -> StoreResult<User>;

    async fn get_user(&self, user_id: i64) -> StoreResult<Option<User>>;
}
