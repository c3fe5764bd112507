//! Periodic due-scan-and-deliver loop
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Recurring tasks; bounded batches under a tick lock, injected store and clock
//! - 1.0.0: One-shot reminders polled from the database

use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::dispatcher::{DeliveryOutcome, Messenger, ReminderDispatcher};
use super::due::DueSelector;
use crate::core::Clock;
use crate::database::Database;

/// Per-tick tallies
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub selected: usize,
    pub delivered: usize,
    pub deferred: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Completed(TickReport),
    /// A previous tick still held the lock
    Overlapped,
}

pub struct ReminderScheduler {
    selector: DueSelector,
    dispatcher: ReminderDispatcher,
    clock: Arc<dyn Clock>,
    tick_lock: Arc<Mutex<()>>,
    period: Duration,
    batch_limit: usize,
}

impl ReminderScheduler {
    pub fn new(
        selector: DueSelector,
        dispatcher: ReminderDispatcher,
        clock: Arc<dyn Clock>,
        period: Duration,
        batch_limit: usize,
    ) -> Self {
        Self {
            selector,
            dispatcher,
            clock,
            tick_lock: Arc::new(Mutex::new(())),
            period,
            batch_limit,
        }
    }

    /// Wire a scheduler whose store, user lookup, sleep flag and clock all come from `database`
    pub fn with_database(
        database: Database,
        messenger: Arc<dyn Messenger>,
        period: Duration,
        batch_limit: usize,
    ) -> Self {
        let clock = database.clock();
        let store = Arc::new(database);
        let selector = DueSelector::new(store.clone());
        let dispatcher = ReminderDispatcher::new(
            store.clone(),
            store.clone(),
            store,
            messenger,
            clock.clone(),
        );
        Self::new(selector, dispatcher, clock, period, batch_limit)
    }

    /// Run forever, one tick per period
    ///
    /// A tick that overruns the period is followed immediately by the next one.
    /// There is no catch-up beyond the batch limit.
    pub async fn run(self) {
        info!(
            "⏰ Reminder scheduler started (period {:?}, batch limit {})",
            self.period, self.batch_limit
        );

        loop {
            let started = Instant::now();

            if let TickOutcome::Completed(report) = self.tick().await {
                if report.delivered > 0 || report.failed > 0 {
                    info!(
                        "Tick: {} selected, {} sent, {} deferred, {} skipped, {} failed",
                        report.selected,
                        report.delivered,
                        report.deferred,
                        report.skipped,
                        report.failed
                    );
                } else {
                    debug!("Tick: {report:?}");
                }
            }

            let elapsed = started.elapsed();
            if elapsed > self.period {
                warn!("Tick took {elapsed:?}, longer than the {:?} period", self.period);
            }
            tokio::time::sleep(self.period.saturating_sub(elapsed)).await;
        }
    }

    /// Execute one tick unless another is still running
    ///
    /// Tasks are delivered one after another in due order. A failure on one
    /// task is logged and does not stop its siblings.
    pub async fn tick(&self) -> TickOutcome {
        let Ok(_guard) = self.tick_lock.try_lock() else {
            warn!("Previous reminder tick still running; skipping this trigger");
            return TickOutcome::Overlapped;
        };

        let mut report = TickReport::default();
        let now = self.clock.now_ts();

        let batch = match self.selector.select(now, self.batch_limit, None).await {
            Ok(batch) => batch,
            Err(e) => {
                error!("Failed to select due reminders: {e}");
                return TickOutcome::Completed(report);
            }
        };
        report.selected = batch.len();

        for task in &batch {
            match self.dispatcher.deliver(task).await {
                Ok(DeliveryOutcome::Delivered { .. }) => report.delivered += 1,
                Ok(DeliveryOutcome::Deferred { .. }) => report.deferred += 1,
                Ok(DeliveryOutcome::OwnerMissing) => report.skipped += 1,
                Err(e) => {
                    error!("Failed to deliver reminder for task {}: {e:#}", task.id);
                    report.failed += 1;
                }
            }
        }

        TickOutcome::Completed(report)
    }
}
