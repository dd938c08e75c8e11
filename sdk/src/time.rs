//! # Network Time
//!
//! Transaction timestamps are whole seconds since the Lisk epoch
//! ([`config::epoch`](crate::config::epoch)). Nodes reject transactions
//! stamped in their future, so the clock is injectable: production code
//! uses [`SystemClock`], tests pin time with [`FixedClock`].

use chrono::{DateTime, Duration, Utc};

use crate::config::epoch;

/// A source of "now".
pub trait EpochClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Seconds since the Lisk epoch.
    fn now_epoch_seconds(&self) -> i32 {
        epoch_seconds(self.now())
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl EpochClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock reading exactly `seconds` after the Lisk epoch.
    pub fn at_epoch_seconds(seconds: i64) -> Self {
        Self(epoch() + Duration::seconds(seconds))
    }
}

impl EpochClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whole seconds from the Lisk epoch to `at`, rounded down.
pub fn epoch_seconds(at: DateTime<Utc>) -> i32 {
    let seconds = (at - epoch()).num_milliseconds().div_euclid(1000);
    i32::try_from(seconds).unwrap_or(if seconds < 0 { i32::MIN } else { i32::MAX })
}

/// Epoch seconds `offset_seconds` away from the clock's current reading.
/// Negative offsets stamp transactions in the past.
pub fn time_with_offset<C: EpochClock + ?Sized>(clock: &C, offset_seconds: i32) -> i32 {
    epoch_seconds(clock.now() + Duration::seconds(i64::from(offset_seconds)))
}
