//! Deterministic clock for asserting output event timestamps.

use chrono::{DateTime, TimeZone, Utc};
use vignette_core::clock::Clock;

/// Always reports the wrapped instant. `Default` is 2026-01-15 10:00 UTC.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
