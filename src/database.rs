//! # SQLite persistence
//!
//! Users and tasks in a single SQLite file. Every mutation is one conditional
//! statement matched by id and owner; nothing spans a transaction.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Injected clock so due-time arithmetic is testable
//! - 1.1.0: Sleep flag on users, snooze and interval updates on tasks
//! - 1.0.0: Initial users/tasks schema

use async_trait::async_trait;
use log::{debug, info};
use sqlite::{Connection, State, Statement};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::config::DEFAULT_TIMEZONE;
use crate::core::{Clock, SystemClock};
use crate::features::reminders::model::{minutes_from, Task, TaskStatus, User, MAX_INTERVAL_MINUTES};
use crate::features::reminders::{SleepGate, StoreError, StoreResult, TaskStore, UserDirectory};

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        external_id INTEGER NOT NULL UNIQUE,
        username    TEXT,
        timezone    TEXT NOT NULL,
        is_sleeping INTEGER NOT NULL DEFAULT 0,
        created_at  INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS tasks (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id          INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name             TEXT NOT NULL,
        note             TEXT,
        status           INTEGER NOT NULL DEFAULT 1 CHECK (status IN (0, 1)),
        next_reminder_at INTEGER NOT NULL,
        interval_minutes INTEGER NOT NULL CHECK (interval_minutes > 0),
        paused_until     INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_tasks_status_user_time
        ON tasks(status, user_id, next_reminder_at);
";

const TASK_COLUMNS: &str =
    "id, user_id, name, note, status, next_reminder_at, interval_minutes, paused_until";

const USER_COLUMNS: &str = "id, external_id, username, timezone, is_sleeping";

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
    default_timezone: String,
}

impl Database {
    /// Open (or create) the database file and apply the schema
    pub async fn new(path: &str) -> StoreResult<Self> {
        let db = Self::open(path)?;
        info!("📦 Database ready at {path}");
        Ok(db)
    }

    /// Private in-memory database, used by tests
    pub async fn in_memory() -> StoreResult<Self> {
        Self::open(":memory:")
    }

    fn open(path: &str) -> StoreResult<Self> {
        let connection = sqlite::open(path)?;
        connection.execute(SCHEMA)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            clock: Arc::new(SystemClock),
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        })
    }

    /// Replace the time source used for "now"
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Time source shared with the scheduler
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Timezone stored on newly created users
    pub fn with_default_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.default_timezone = timezone.into();
        self
    }

    /// Fetch one task regardless of status, matched by id and owner
    pub async fn get_task(&self, task_id: i64, owner_id: i64) -> StoreResult<Option<Task>> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare(format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND user_id = ?"
        ))?;
        stmt.bind((1, task_id))?;
        stmt.bind((2, owner_id))?;
        if let State::Row = stmt.next()? {
            Ok(Some(read_task(&stmt)?))
        } else {
            Ok(None)
        }
    }

    /// Run one conditional update and report whether exactly one row matched
    fn update_one(conn: &Connection, stmt: &mut Statement<'_>) -> StoreResult<bool> {
        while let State::Row = stmt.next()? {}
        Ok(conn.change_count() == 1)
    }
}

fn read_task(stmt: &Statement<'_>) -> StoreResult<Task> {
    let status_raw = stmt.read::<i64, _>("status")?;
    Ok(Task {
        id: stmt.read::<i64, _>("id")?,
        user_id: stmt.read::<i64, _>("user_id")?,
        name: stmt.read::<String, _>("name")?,
        note: stmt.read::<Option<String>, _>("note")?,
        // CHECK constraint keeps status at 0 or 1
        status: TaskStatus::from_db(status_raw).unwrap_or(TaskStatus::Done),
        next_reminder_at: stmt.read::<i64, _>("next_reminder_at")?,
        interval_minutes: stmt.read::<i64, _>("interval_minutes")?,
        paused_until: stmt.read::<Option<i64>, _>("paused_until")?,
    })
}

fn read_user(stmt: &Statement<'_>) -> StoreResult<User> {
    Ok(User {
        id: stmt.read::<i64, _>("id")?,
        external_id: stmt.read::<i64, _>("external_id")?,
        username: stmt.read::<Option<String>, _>("username")?,
        timezone: stmt.read::<String, _>("timezone")?,
        is_sleeping: stmt.read::<i64, _>("is_sleeping")? != 0,
    })
}

fn read_tasks(stmt: &mut Statement<'_>) -> StoreResult<Vec<Task>> {
    let mut tasks = Vec::new();
    while let State::Row = stmt.next()? {
        tasks.push(read_task(stmt)?);
    }
    Ok(tasks)
}

#[async_trait]
impl TaskStore for Database {
    async fn add_task(
        &self,
        user_id: i64,
        name: &str,
        note: Option<&str>,
        interval_minutes: i64,
    ) -> StoreResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("task name is empty".to_string()));
        }
        let now = self.clock.now_ts();
        let Some(next_reminder_at) = minutes_from(now, interval_minutes) else {
            return Err(StoreError::InvalidInput(format!(
                "interval must be between 1 and {MAX_INTERVAL_MINUTES} minutes, got {interval_minutes}"
            )));
        };
        let note = note.map(str::trim).filter(|n| !n.is_empty());

        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare(
            "INSERT INTO tasks (user_id, name, note, status, next_reminder_at, interval_minutes, paused_until)
             VALUES (?, ?, ?, ?, ?, ?, NULL)",
        )?;
        stmt.bind((1, user_id))?;
        stmt.bind((2, name))?;
        stmt.bind((3, note))?;
        stmt.bind((4, TaskStatus::Active.as_db()))?;
        stmt.bind((5, next_reminder_at))?;
        stmt.bind((6, interval_minutes))?;
        while let State::Row = stmt.next()? {}

        let mut id_stmt = conn.prepare("SELECT last_insert_rowid() AS id")?;
        id_stmt.next()?;
        let task_id = id_stmt.read::<i64, _>("id")?;

        debug!("Inserted task {task_id} for user {user_id}, first reminder at {next_reminder_at}");
        Ok(task_id)
    }

    async fn get_due(&self, now: i64, limit: i64, user_id: Option<i64>) -> StoreResult<Vec<Task>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let conn = self.connection.lock().await;
        let mut stmt = match user_id {
            Some(owner) => {
                let mut stmt = conn.prepare(format!(
                    "SELECT {TASK_COLUMNS} FROM tasks
                     WHERE user_id = ?
                       AND status = 1
                       AND next_reminder_at <= ?
                       AND (paused_until IS NULL OR paused_until <= ?)
                     ORDER BY next_reminder_at ASC, id ASC
                     LIMIT ?"
                ))?;
                stmt.bind((1, owner))?;
                stmt.bind((2, now))?;
                stmt.bind((3, now))?;
                stmt.bind((4, limit))?;
                stmt
            }
            None => {
                let mut stmt = conn.prepare(format!(
                    "SELECT {TASK_COLUMNS} FROM tasks
                     WHERE status = 1
                       AND next_reminder_at <= ?
                       AND (paused_until IS NULL OR paused_until <= ?)
                     ORDER BY next_reminder_at ASC, id ASC
                     LIMIT ?"
                ))?;
                stmt.bind((1, now))?;
                stmt.bind((2, now))?;
                stmt.bind((3, limit))?;
                stmt
            }
        };
        read_tasks(&mut stmt)
    }

    async fn mark_done(&self, task_id: i64, owner_id: i64) -> StoreResult<bool> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare("UPDATE tasks SET status = ? WHERE id = ? AND user_id = ?")?;
        stmt.bind((1, TaskStatus::Done.as_db()))?;
        stmt.bind((2, task_id))?;
        stmt.bind((3, owner_id))?;
        Self::update_one(&conn, &mut stmt)
    }

    async fn delete_task(&self, task_id: i64, owner_id: i64) -> StoreResult<bool> {
        self.mark_done(task_id, owner_id).await
    }

    async fn snooze(&self, task_id: i64, owner_id: i64, minutes: i64) -> StoreResult<bool> {
        let Some(paused_until) = minutes_from(self.clock.now_ts(), minutes) else {
            return Ok(false);
        };

        let conn = self.connection.lock().await;
        let mut stmt =
            conn.prepare("UPDATE tasks SET paused_until = ? WHERE id = ? AND user_id = ?")?;
        stmt.bind((1, paused_until))?;
        stmt.bind((2, task_id))?;
        stmt.bind((3, owner_id))?;
        Self::update_one(&conn, &mut stmt)
    }

    async fn reschedule(&self, task_id: i64, owner_id: i64, next_ts: i64) -> StoreResult<bool> {
        if next_ts <= self.clock.now_ts() {
            return Ok(false);
        }

        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare(
            "UPDATE tasks SET next_reminder_at = ?, paused_until = NULL
             WHERE id = ? AND user_id = ?",
        )?;
        stmt.bind((1, next_ts))?;
        stmt.bind((2, task_id))?;
        stmt.bind((3, owner_id))?;
        Self::update_one(&conn, &mut stmt)
    }

    async fn set_interval(&self, task_id: i64, owner_id: i64, minutes: i64) -> StoreResult<bool> {
        if !(1..=MAX_INTERVAL_MINUTES).contains(&minutes) {
            return Ok(false);
        }

        let conn = self.connection.lock().await;
        let mut stmt =
            conn.prepare("UPDATE tasks SET interval_minutes = ? WHERE id = ? AND user_id = ?")?;
        stmt.bind((1, minutes))?;
        stmt.bind((2, task_id))?;
        stmt.bind((3, owner_id))?;
        Self::update_one(&conn, &mut stmt)
    }

    async fn count_open(&self, user_id: i64) -> StoreResult<i64> {
        let conn = self.connection.lock().await;
        let mut stmt =
            conn.prepare("SELECT COUNT(*) AS total FROM tasks WHERE user_id = ? AND status = 1")?;
        stmt.bind((1, user_id))?;
        stmt.next()?;
        Ok(stmt.read::<i64, _>("total")?)
    }

    async fn list_open_paged(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Vec<Task>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let offset = offset.max(0);

        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare(format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE user_id = ? AND status = 1
             ORDER BY next_reminder_at ASC, id ASC
             LIMIT ? OFFSET ?"
        ))?;
        stmt.bind((1, user_id))?;
        stmt.bind((2, limit))?;
        stmt.bind((3, offset))?;
        read_tasks(&mut stmt)
    }
}

#[async_trait]
impl UserDirectory for Database {
    async fn get_or_create_user(
        &self,
        external_id: i64,
        username: Option<&str>,
    ) -> StoreResult<User> {
        let conn = self.connection.lock().await;

        let existing = {
            let mut select = conn.prepare(format!(
                "SELECT {USER_COLUMNS} FROM users WHERE external_id = ?"
            ))?;
            select.bind((1, external_id))?;
            match select.next()? {
                State::Row => Some(read_user(&select)?),
                State::Done => None,
            }
        };

        if let Some(mut user) = existing {
            if username.is_some() && user.username.as_deref() != username {
                let mut update = conn.prepare("UPDATE users SET username = ? WHERE id = ?")?;
                update.bind((1, username))?;
                update.bind((2, user.id))?;
                while let State::Row = update.next()? {}
                user.username = username.map(str::to_string);
            }
            return Ok(user);
        }

        let mut insert = conn.prepare(
            "INSERT INTO users (external_id, username, timezone, is_sleeping, created_at)
             VALUES (?, ?, ?, 0, ?)",
        )?;
        insert.bind((1, external_id))?;
        insert.bind((2, username))?;
        insert.bind((3, self.default_timezone.as_str()))?;
        insert.bind((4, self.clock.now_ts()))?;
        while let State::Row = insert.next()? {}

        let mut select = conn.prepare(format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = last_insert_rowid()"
        ))?;
        select.next()?;
        let user = read_user(&select)?;
        info!("👤 Registered user {} (external id {external_id})", user.id);
        Ok(user)
    }

    async fn get_user(&self, user_id: i64) -> StoreResult<Option<User>> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare(format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))?;
        stmt.bind((1, user_id))?;
        if let State::Row = stmt.next()? {
            Ok(Some(read_user(&stmt)?))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl SleepGate for Database {
    async fn set_sleeping(&self, user_id: i64, sleeping: bool) -> StoreResult<bool> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare("UPDATE users SET is_sleeping = ? WHERE id = ?")?;
        stmt.bind((1, i64::from(sleeping)))?;
        stmt.bind((2, user_id))?;
        Self::update_one(&conn, &mut stmt)
    }

    async fn is_sleeping(&self, user_id: i64) -> StoreResult<bool> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare("SELECT is_sleeping FROM users WHERE id = ?")?;
        stmt.bind((1, user_id))?;
        if let State::Row = stmt.next()? {
            Ok(stmt.read::<i64, _>("is_sleeping")? != 0)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
impl Database {
    /// Write an interval directly, bypassing the range check
    pub(crate) async fn force_interval(&self, task_id: i64, minutes: i64) -> StoreResult<()> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare("UPDATE tasks SET interval_minutes = ? WHERE id = ?")?;
        stmt.bind((1, minutes))?;
        stmt.bind((2, task_id))?;
        while let State::Row = stmt.next()? {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    async fn setup(now: i64) -> (Database, Arc<ManualClock>, User) {
        let clock = Arc::new(ManualClock::new(now));
        let db = Database::in_memory()
            .await
            .unwrap()
            .with_clock(clock.clone());
        let user = db.get_or_create_user(111, Some("alice")).await.unwrap();
        (db, clock, user)
    }

    #[tokio::test]
    async fn test_add_task_schedules_one_interval_ahead() {
        let (db, _clock, user) = setup(1000).await;

        let id = db
            .add_task(user.id, "  T1  ", Some("bring the form"), 10)
            .await
            .unwrap();
        let task = db.get_task(id, user.id).await.unwrap().unwrap();

        assert_eq!(task.name, "T1");
        assert_eq!(task.note.as_deref(), Some("bring the form"));
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.next_reminder_at, 1600);
        assert_eq!(task.interval_minutes, 10);
        assert_eq!(task.paused_until, None);
    }

    #[tokio::test]
    async fn test_add_task_rejects_invalid_input() {
        let (db, _clock, user) = setup(1000).await;

        let blank = db.add_task(user.id, "   ", None, 10).await;
        assert!(matches!(blank, Err(StoreError::InvalidInput(_))));

        let zero = db.add_task(user.id, "T1", None, 0).await;
        assert!(matches!(zero, Err(StoreError::InvalidInput(_))));

        let negative = db.add_task(user.id, "T1", None, -5).await;
        assert!(matches!(negative, Err(StoreError::InvalidInput(_))));

        assert_eq!(db.count_open(user.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_note_stored_as_null() {
        let (db, _clock, user) = setup(1000).await;
        let id = db.add_task(user.id, "T1", Some("  "), 5).await.unwrap();
        let task = db.get_task(id, user.id).await.unwrap().unwrap();
        assert_eq!(task.note, None);
    }

    #[tokio::test]
    async fn test_get_due_orders_and_caps() {
        let (db, clock, user) = setup(0).await;
        // Due at 600, 300, 900 respectively
        let a = db.add_task(user.id, "a", None, 10).await.unwrap();
        let b = db.add_task(user.id, "b", None, 5).await.unwrap();
        let c = db.add_task(user.id, "c", None, 15).await.unwrap();
        db.add_task(user.id, "later", None, 60).await.unwrap();

        clock.set(1000);
        let due = db.get_due(1000, 2, None).await.unwrap();
        let ids: Vec<i64> = due.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, a]);
        assert!(due.iter().all(|t| t.is_due(1000)));

        // The capped-off task is deferred to the next batch, not dropped
        for task in &due {
            assert!(db.reschedule(task.id, user.id, 5000).await.unwrap());
        }
        let rest = db.get_due(1000, 2, None).await.unwrap();
        assert_eq!(rest.iter().map(|t| t.id).collect::<Vec<_>>(), vec![c]);
    }

    #[tokio::test]
    async fn test_get_due_non_positive_limit_is_empty() {
        let (db, _clock, user) = setup(0).await;
        db.add_task(user.id, "a", None, 1).await.unwrap();
        assert!(db.get_due(10_000, 0, None).await.unwrap().is_empty());
        assert!(db.get_due(10_000, -1, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_due_user_scope() {
        let (db, _clock, alice) = setup(0).await;
        let bob = db.get_or_create_user(222, Some("bob")).await.unwrap();
        let mine = db.add_task(alice.id, "mine", None, 1).await.unwrap();
        db.add_task(bob.id, "theirs", None, 1).await.unwrap();

        let due = db.get_due(10_000, 10, Some(alice.id)).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, mine);
        assert_eq!(db.get_due(10_000, 10, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reschedule_requires_future_target() {
        let (db, clock, user) = setup(1000).await;
        let id = db.add_task(user.id, "T1", None, 10).await.unwrap();
        clock.set(2000);

        assert!(!db.reschedule(id, user.id, 2000).await.unwrap());
        assert!(!db.reschedule(id, user.id, 1500).await.unwrap());
        assert_eq!(db.get_task(id, user.id).await.unwrap().unwrap().next_reminder_at, 1600);

        assert!(db.reschedule(id, user.id, 2001).await.unwrap());
        assert_eq!(db.get_task(id, user.id).await.unwrap().unwrap().next_reminder_at, 2001);
    }

    #[tokio::test]
    async fn test_reschedule_clears_snooze() {
        let (db, _clock, user) = setup(1000).await;
        let id = db.add_task(user.id, "T1", None, 10).await.unwrap();
        assert!(db.snooze(id, user.id, 30).await.unwrap());
        assert!(db.reschedule(id, user.id, 5000).await.unwrap());

        let task = db.get_task(id, user.id).await.unwrap().unwrap();
        assert_eq!(task.paused_until, None);
    }

    #[tokio::test]
    async fn test_snooze_rejects_non_positive_minutes() {
        let (db, _clock, user) = setup(1000).await;
        let id = db.add_task(user.id, "T1", None, 10).await.unwrap();

        assert!(!db.snooze(id, user.id, 0).await.unwrap());
        assert!(!db.snooze(id, user.id, -10).await.unwrap());
        let task = db.get_task(id, user.id).await.unwrap().unwrap();
        assert_eq!(task.paused_until, None);
        assert_eq!(task.next_reminder_at, 1600);
    }

    #[tokio::test]
    async fn test_snooze_suppresses_overdue_task() {
        let (db, clock, user) = setup(1000).await;
        let id = db.add_task(user.id, "T1", None, 10).await.unwrap();

        clock.set(2000);
        assert_eq!(db.get_due(2000, 10, None).await.unwrap().len(), 1);

        assert!(db.snooze(id, user.id, 15).await.unwrap());
        let task = db.get_task(id, user.id).await.unwrap().unwrap();
        assert_eq!(task.paused_until, Some(2900));
        assert_eq!(task.next_reminder_at, 1600);

        assert!(db.get_due(2899, 10, None).await.unwrap().is_empty());
        assert_eq!(db.get_due(2900, 10, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_done_and_delete_are_equivalent() {
        let (db, _clock, user) = setup(1000).await;
        let a = db.add_task(user.id, "a", None, 1).await.unwrap();
        let b = db.add_task(user.id, "b", None, 1).await.unwrap();

        assert!(db.mark_done(a, user.id).await.unwrap());
        assert!(db.delete_task(b, user.id).await.unwrap());

        // Already done: still matched by id and owner
        assert!(db.mark_done(a, user.id).await.unwrap());
        assert!(db.delete_task(a, user.id).await.unwrap());

        for id in [a, b] {
            let task = db.get_task(id, user.id).await.unwrap().unwrap();
            assert_eq!(task.status, TaskStatus::Done);
        }
        assert_eq!(db.count_open(user.id).await.unwrap(), 0);
        assert!(db.get_due(100_000, 10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_require_ownership() {
        let (db, _clock, alice) = setup(1000).await;
        let bob = db.get_or_create_user(222, None).await.unwrap();
        let id = db.add_task(alice.id, "T1", None, 10).await.unwrap();

        assert!(!db.mark_done(id, bob.id).await.unwrap());
        assert!(!db.delete_task(id, bob.id).await.unwrap());
        assert!(!db.snooze(id, bob.id, 10).await.unwrap());
        assert!(!db.reschedule(id, bob.id, 9999).await.unwrap());
        assert!(!db.set_interval(id, bob.id, 20).await.unwrap());
        assert!(!db.mark_done(9999, alice.id).await.unwrap());

        let task = db.get_task(id, alice.id).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.interval_minutes, 10);
    }

    #[tokio::test]
    async fn test_set_interval_keeps_next_reminder() {
        let (db, _clock, user) = setup(1000).await;
        let id = db.add_task(user.id, "T1", None, 10).await.unwrap();

        assert!(db.set_interval(id, user.id, 45).await.unwrap());
        assert!(!db.set_interval(id, user.id, 0).await.unwrap());

        let task = db.get_task(id, user.id).await.unwrap().unwrap();
        assert_eq!(task.interval_minutes, 45);
        assert_eq!(task.next_reminder_at, 1600);
    }

    #[tokio::test]
    async fn test_huge_minutes_are_rejected_without_overflow() {
        let (db, _clock, user) = setup(1000).await;
        let huge = 2_016_000_000_000_000_000;

        let added = db.add_task(user.id, "T1", None, huge).await;
        assert!(matches!(added, Err(StoreError::InvalidInput(_))));
        let added = db
            .add_task(user.id, "T1", None, MAX_INTERVAL_MINUTES + 1)
            .await;
        assert!(matches!(added, Err(StoreError::InvalidInput(_))));

        let id = db.add_task(user.id, "T1", None, 10).await.unwrap();
        assert!(!db.snooze(id, user.id, huge).await.unwrap());
        assert!(!db.set_interval(id, user.id, huge).await.unwrap());
        assert!(!db.set_interval(id, user.id, i64::MAX).await.unwrap());

        let task = db.get_task(id, user.id).await.unwrap().unwrap();
        assert_eq!(task.interval_minutes, 10);
        assert_eq!(task.paused_until, None);
    }

    #[tokio::test]
    async fn test_longest_interval_is_accepted() {
        let (db, _clock, user) = setup(1000).await;
        let id = db
            .add_task(user.id, "T1", None, MAX_INTERVAL_MINUTES)
            .await
            .unwrap();
        let task = db.get_task(id, user.id).await.unwrap().unwrap();
        assert_eq!(task.next_reminder_at, 1000 + MAX_INTERVAL_MINUTES * 60);
        assert!(db.snooze(id, user.id, MAX_INTERVAL_MINUTES).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_open_paged() {
        let (db, _clock, user) = setup(0).await;
        for i in 1..=12 {
            db.add_task(user.id, &format!("task {i}"), None, i).await.unwrap();
        }
        let done = db.list_open_paged(user.id, 0, 1).await.unwrap()[0].id;
        db.mark_done(done, user.id).await.unwrap();

        assert_eq!(db.count_open(user.id).await.unwrap(), 11);

        let page = db.list_open_paged(user.id, 5, 5).await.unwrap();
        let names: Vec<&str> = page.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["task 7", "task 8", "task 9", "task 10", "task 11"]);

        let clamped = db.list_open_paged(user.id, -3, 2).await.unwrap();
        assert_eq!(clamped[0].name, "task 2");
        assert!(db.list_open_paged(user.id, 0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_or_create_user_is_unique() {
        let (db, _clock, first) = setup(1000).await;

        let again = db.get_or_create_user(111, Some("alice")).await.unwrap();
        assert_eq!(first.id, again.id);
        assert_eq!(first.timezone, DEFAULT_TIMEZONE);

        let renamed = db.get_or_create_user(111, Some("alice2")).await.unwrap();
        assert_eq!(renamed.id, first.id);
        assert_eq!(renamed.username.as_deref(), Some("alice2"));

        let other = db.get_or_create_user(333, None).await.unwrap();
        assert_ne!(other.id, first.id);
        assert_eq!(db.get_user(other.id).await.unwrap().unwrap().external_id, 333);
        assert!(db.get_user(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sleep_flag_round_trip() {
        let (db, _clock, user) = setup(1000).await;

        assert!(!db.is_sleeping(user.id).await.unwrap());
        assert!(db.set_sleeping(user.id, true).await.unwrap());
        assert!(db.is_sleeping(user.id).await.unwrap());
        assert!(db.set_sleeping(user.id, false).await.unwrap());
        assert!(!db.is_sleeping(user.id).await.unwrap());

        assert!(!db.set_sleeping(9999, true).await.unwrap());
        assert!(!db.is_sleeping(9999).await.unwrap());
    }
}
