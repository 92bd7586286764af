//! Wall-clock seam — supplies creation/update timestamps.
//!
//! RULE: Nothing below the engine reads the system clock directly.
//! All timestamps flow through a Clock handed to the engine, so tests
//! can pin time and runs stay reproducible.

use chrono::{DateTime, TimeZone, Utc};

pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock: current UTC time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to a single instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Midnight UTC on the given calendar day.
    pub fn at_midnight(year: i32, month: u32, day: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
                .single()
                .expect("valid calendar day"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
