//! Live clock using the system time.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock that reads the system time on every call.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
