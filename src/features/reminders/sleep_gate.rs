//! Per-user suspend switch
//!
//! While a user sleeps the dispatcher sends nothing to them. Their due tasks
//! are pushed back one interval at a time instead of being re-selected on
//! every tick.

use async_trait::async_trait;

use super::store::StoreResult;

#[async_trait]
pub trait SleepGate: Send + Sync {
    /// Returns false when no such user exists
    async fn set_sleeping(&self, user_id: i64, sleeping: bool) -> StoreResult<bool>;

    /// Unknown users count as awake
    async fn is_sleeping(&self, user_id: i64) -> StoreResult<bool>;
}
