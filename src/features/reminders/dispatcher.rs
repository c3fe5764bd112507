//! Single-task delivery and post-delivery reschedule
//!
//! Sending and rescheduling are two separate calls. A crash between them
//! re-sends the reminder on the next tick (at-least-once); it can never lose
//! one, because the task stays due until the reschedule lands.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::message::compose_reminder;
use super::model::Task;
use super::sleep_gate::SleepGate;
use super::store::{TaskStore, UserDirectory};
use crate::core::Clock;

/// Outbound channel for reminder text
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver `text` to the user behind `address`
    async fn send(&self, address: i64, text: &str) -> Result<()>;
}

/// What happened to one due task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Message sent. `None` when the reschedule matched no row.
    Delivered { rescheduled_to: Option<i64> },
    /// Owner is asleep; nothing sent, task pushed back one interval
    Deferred { rescheduled_to: Option<i64> },
    /// Owning user row is gone
    OwnerMissing,
}

pub struct ReminderDispatcher {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserDirectory>,
    sleep_gate: Arc<dyn SleepGate>,
    messenger: Arc<dyn Messenger>,
    clock: Arc<dyn Clock>,
}

impl ReminderDispatcher {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserDirectory>,
        sleep_gate: Arc<dyn SleepGate>,
        messenger: Arc<dyn Messenger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tasks,
            users,
            sleep_gate,
            messenger,
            clock,
        }
    }

    fn next_reminder(&self, task: &Task) -> Result<i64> {
        task.next_after(self.clock.now_ts()).ok_or_else(|| {
            anyhow!(
                "Task {} has an out-of-range interval of {} minutes",
                task.id,
                task.interval_minutes
            )
        })
    }

    /// Deliver one due task
    ///
    /// A send error is returned untouched and leaves the task as it was, so
    /// the next tick selects it again. A task whose interval cannot produce a
    /// next reminder is an error and nothing is sent.
    pub async fn deliver(&self, task: &Task) -> Result<DeliveryOutcome> {
        self.next_reminder(task)?;

        let Some(user) = self.users.get_user(task.user_id).await? else {
            warn!("Task {} has no owner row (user {}); skipping", task.id, task.user_id);
            return Ok(DeliveryOutcome::OwnerMissing);
        };

        if self.sleep_gate.is_sleeping(user.id).await? {
            let next = self.next_reminder(task)?;
            let ok = self.tasks.reschedule(task.id, user.id, next).await?;
            debug!("User {} is sleeping; task {} deferred to {next}", user.id, task.id);
            return Ok(DeliveryOutcome::Deferred {
                rescheduled_to: ok.then_some(next),
            });
        }

        let text = compose_reminder(&task.name, task.note.as_deref());
        self.messenger.send(user.external_id, &text).await?;

        let next = self.next_reminder(task)?;
        let ok = self.tasks.reschedule(task.id, user.id, next).await?;
        if ok {
            info!("🔔 Reminded user {} about task {}; next at {next}", user.id, task.id);
        } else {
            // Row vanished while the send was in flight
            warn!("Task {} was sent but not rescheduled (no matching row)", task.id);
        }

        Ok(DeliveryOutcome::Delivered {
            rescheduled_to: ok.then_some(next),
        })
    }
}
