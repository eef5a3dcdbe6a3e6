//! Manually advanced clock for tests and demos.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Duration;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hand one clone to the stores
/// and keep another to advance.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.plus(duration);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }

    pub fn set(&self, instant: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Timestamp::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_stands_still_until_advanced() {
        let start = Timestamp::now();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);
        clock.advance_days(2);
        assert_eq!(clock.now(), start.plus_days(2));
    }

    #[test]
    fn clones_share_the_same_instant() {
        let clock = ManualClock::new(Timestamp::now());
        let handle = clock.clone();
        let target = Timestamp::now().plus_days(10);

        handle.set(target);

        assert_eq!(clock.now(), target);
    }
}
