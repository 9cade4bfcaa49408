//! Pinned time for tests.

use chrono::{DateTime, TimeZone, Utc};
use coasters_core::clock::Clock;

/// Reports the same instant on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    /// 2026-01-15 10:00:00 UTC, the instant every test in the workspace uses.
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

/// Shorthand for [`FixedClock::default`].
#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock::default()
}
