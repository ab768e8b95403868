use chrono::{DateTime, Timelike};
use chrono_tz::Tz;

/// Hours of the local day during which bookings are accepted, `[open_hour, close_hour)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl BookingWindow {
    pub fn new(open_hour: u32, close_hour: u32) -> Self {
        Self {
            open_hour,
            close_hour,
        }
    }

    pub fn allows_hour(&self, hour: u32) -> bool {
        hour >= self.open_hour && hour < self.close_hour
    }

    /// Whether the local hour of `now` falls inside the window
    pub fn allows(&self, now: &DateTime<Tz>) -> bool {
        self.allows_hour(now.hour())
    }
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self::new(7, 20)
    }
}
