//! Deadline-based scheduler polled by the host loop.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;
use vignette_core::scheduler::{Scheduler, TimerId};

/// Keeps armed timers as absolute deadlines. The host sleeps until
/// [`DeadlineScheduler::next_deadline`] and then collects what is due.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_id: u64,
    armed: Vec<(TimerId, Instant)>,
}

impl DeadlineScheduler {
    /// Earliest armed deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.iter().map(|(_, at)| *at).min()
    }

    /// Removes and returns the timers due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(TimerId, Instant)> = self
            .armed
            .iter()
            .copied()
            .filter(|(_, at)| *at <= now)
            .collect();
        self.armed.retain(|(_, at)| *at > now);
        due.sort_by_key(|(id, at)| (*at, *id));
        due.into_iter().map(|(id, _)| id).collect()
    }

    /// Number of armed timers.
    #[must_use]
    pub fn armed(&self) -> usize {
        self.armed.len()
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.armed.push((id, Instant::now() + delay));
        debug!(timer = %id, ?delay, "timer armed");
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.armed.retain(|(armed, _)| *armed != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_timers_are_returned_once_in_deadline_order() {
        // Arrange
        let mut scheduler = DeadlineScheduler::default();
        let later = scheduler.schedule(Duration::from_millis(20));
        let sooner = scheduler.schedule(Duration::from_millis(10));
        let now = Instant::now() + Duration::from_millis(50);

        // Act
        let due = scheduler.take_due(now);

        // Assert
        assert_eq!(due, vec![sooner, later]);
        assert!(scheduler.take_due(now).is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut scheduler = DeadlineScheduler::default();
        let id = scheduler.schedule(Duration::from_millis(1));

        scheduler.cancel(id);

        assert!(
            scheduler
                .take_due(Instant::now() + Duration::from_secs(1))
                .is_empty()
        );
        assert_eq!(scheduler.armed(), 0);
    }

    #[test]
    fn test_next_deadline_is_the_earliest() {
        let mut scheduler = DeadlineScheduler::default();
        scheduler.schedule(Duration::from_secs(10));
        scheduler.schedule(Duration::from_secs(1));

        let next = scheduler.next_deadline().unwrap();

        assert!(next <= Instant::now() + Duration::from_secs(1));
    }
}
