//! The time source used to stamp transactions.

use time::OffsetDateTime;

/// Provides the current time.
pub trait Clock {
    /// The current date and time.
    fn now(&self) -> OffsetDateTime;
}

/// Reads the time from the operating system, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
