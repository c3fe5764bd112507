//! Wall-clock abstraction in absolute epoch seconds
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" for everything that reasons about due times
pub trait Clock: Send + Sync {
    /// Current time as epoch seconds
    fn now_ts(&self) -> i64;
}

/// Real time via chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ts(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Hand-driven clock for deterministic scheduling
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, ts: i64) {
        self.now.store(ts, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ts(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
