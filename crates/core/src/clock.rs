//! Injectable time source.
//!
//! Every date-sensitive call path asks a [`Clock`] for "now" instead of
//! reading the system time directly, so tests can pin the current date and a
//! long-running process never operates on a stale "today".

use chrono::{DateTime, Local, NaiveDate, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date in the server's local timezone.
    ///
    /// Ad windows and analytics rows are keyed by local calendar dates, so
    /// bucket boundaries follow the local midnight, not the UTC one.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// The system clock. The only implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
