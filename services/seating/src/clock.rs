//! Wall-clock source in the application time zone

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Supplies "now" to the booking window and the reset scheduler
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// System time converted into the configured zone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}
