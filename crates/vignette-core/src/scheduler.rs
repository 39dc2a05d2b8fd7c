//! Cancellable scheduled callbacks.
//!
//! Renderers never sleep. They ask the host to schedule a timer and receive a
//! `TimerElapsed` signal carrying the same [`TimerId`] when it is due. A
//! cancelled timer must never be delivered.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opaque handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Host-provided timer facility.
pub trait Scheduler {
    /// Arms a single-fire timer that elapses after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancels a pending timer. Cancelling an unknown or already fired timer
    /// is a no-op.
    fn cancel(&mut self, id: TimerId);
}
