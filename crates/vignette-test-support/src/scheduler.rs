//! Test scheduler — time only moves when a test says so.

use std::time::Duration;

use vignette_core::scheduler::{Scheduler, TimerId};

/// A scheduler driven by [`ManualScheduler::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
}

impl ManualScheduler {
    /// Moves time forward by `by` and returns the timers that became due, in
    /// due order. Returned timers are no longer pending.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(TimerId, Duration)> = self
            .pending
            .iter()
            .copied()
            .filter(|(_, at)| *at <= now)
            .collect();
        due.sort_by_key(|(id, at)| (*at, *id));
        self.pending.retain(|(_, at)| *at > now);
        due.into_iter().map(|(id, _)| id).collect()
    }

    /// Timers armed and not yet fired or cancelled.
    #[must_use]
    pub fn pending(&self) -> Vec<TimerId> {
        self.pending.iter().map(|(id, _)| *id).collect()
    }

    /// Timers that were cancelled while pending.
    #[must_use]
    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push((id, self.now + delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != id);
        if self.pending.len() != before {
            self.cancelled.push(id);
        }
    }
}
