//! Due-task selection for one tick

use log::warn;
use std::sync::Arc;

use super::model::Task;
use super::store::{StoreResult, TaskStore};

/// Read-only view over the store that yields the next delivery batch
///
/// The batch holds only due tasks, oldest miss first, and never more than
/// `limit` of them. Anything past the cap stays due and is picked up by a
/// later tick.
#[derive(Clone)]
pub struct DueSelector {
    store: Arc<dyn TaskStore>,
}

impl DueSelector {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn select(
        &self,
        now: i64,
        limit: usize,
        user_scope: Option<i64>,
    ) -> StoreResult<Vec<Task>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let store_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut batch = self.store.get_due(now, store_limit, user_scope).await?;

        let fetched = batch.len();
        batch.retain(|task| task.is_due(now));
        if batch.len() != fetched {
            warn!(
                "Store returned {} task(s) that are not due at {now}; ignoring them",
                fetched - batch.len()
            );
        }
        batch.sort_by_key(|task| task.next_reminder_at);
        batch.truncate(limit);
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::model::TaskStatus;
    use async_trait::async_trait;

    /// Store that ignores the query and hands back a canned list
    struct CannedStore {
        tasks: Vec<Task>,
    }

    fn task(id: i64, next: i64, status: TaskStatus) -> Task {
        Task {
            id,
            user_id: 1,
            name: format!("task {id}"),
            note: None,
            status,
            next_reminder_at: next,
            interval_minutes: 1,
            paused_until: None,
        }
    }

    #[async_trait]
    impl TaskStore for CannedStore {
        async fn add_task(&self, _: i64, _: &str, _: Option<&str>, _: i64) -> StoreResult<i64> {
            unimplemented!()
        }
        async fn get_due(&self, _: i64, _: i64, _: Option<i64>) -> StoreResult<Vec<Task>> {
            Ok(self.tasks.clone())
        }
        async fn mark_done(&self, _: i64, _: i64) -> StoreResult<bool> {
            unimplemented!()
        }
        async fn delete_task(&self, _: i64, _: i64) -> StoreResult<bool> {
            unimplemented!()
        }
        async fn snooze(&self, _: i64, _: i64, _: i64) -> StoreResult<bool> {
            unimplemented!()
        }
        async fn reschedule(&self, _: i64, _: i64, _: i64) -> StoreResult<bool> {
            unimplemented!()
        }
        async fn set_interval(&self, _: i64, _: i64, _: i64) -> StoreResult<bool> {
            unimplemented!()
        }
        async fn count_open(&self, _: i64) -> StoreResult<i64> {
            unimplemented!()
        }
        async fn list_open_paged(&self, _: i64, _: i64, _: i64) -> StoreResult<Vec<Task>> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_select_filters_sorts_and_caps() {
        let store = CannedStore {
            tasks: vec![
                task(1, 90, TaskStatus::Active),
                task(2, 10, TaskStatus::Active),
                task(3, 500, TaskStatus::Active),
                task(4, 5, TaskStatus::Done),
                task(5, 50, TaskStatus::Active),
            ],
        };
        let selector = DueSelector::new(Arc::new(store));

        let batch = selector.select(100, 2, None).await.unwrap();
        let ids: Vec<i64> = batch.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[tokio::test]
    async fn test_zero_limit_skips_store() {
        let selector = DueSelector::new(Arc::new(CannedStore {
            tasks: vec![task(1, 0, TaskStatus::Active)],
        }));
        assert!(selector.select(100, 0, None).await.unwrap().is_empty());
    }
}
