//! Wall-clock abstraction used to timestamp narrative output events.
//!
//! Playback timing (dialogue rotation, captions) never reads this clock; it
//! goes through [`crate::scheduler::Scheduler`] so tests can step time.

use chrono::{DateTime, Utc};

/// Source of timestamps for `EventMetadata::occurred_at`.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
