//! Daily seat reset
//!
//! Once per day at the configured local hour every occupied booking row is
//! flipped back to available. The activity log is left alone. A failed reset
//! is logged and the loop waits for the next day; it is never retried the
//! same day and never stops the process.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

use crate::{clock::Clock, repositories::BookingStore};

/// Longest DST gap we step across when the reset hour falls inside one
const MAX_GAP_MINUTES: i64 = 180;

fn resolve_local(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    (0..=MAX_GAP_MINUTES)
        .find_map(|minutes| tz.from_local_datetime(&(naive + Duration::minutes(minutes))).earliest())
}

/// The next `hour:00:00` local instant strictly after `now`
///
/// Today's occurrence is used when it is still ahead, otherwise tomorrow's.
/// A reset hour skipped by a DST transition resolves to the first valid
/// instant after the gap; a repeated hour resolves to its earlier instant.
pub fn next_reset_after(now: &DateTime<Tz>, hour: u32) -> DateTime<Tz> {
    let tz = now.timezone();
    let mut date = now.date_naive();

    for _ in 0..2 {
        if let Some(candidate) = date
            .and_hms_opt(hour, 0, 0)
            .and_then(|naive| resolve_local(&tz, naive))
        {
            if candidate > *now {
                return candidate;
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    *now + Duration::hours(24)
}

/// Background task resetting occupied seats once per day
pub struct SeatResetScheduler {
    store: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    reset_hour: u32,
    shutdown: watch::Receiver<bool>,
}

impl SeatResetScheduler {
    /// Returns the scheduler and its shutdown sender. Send `true` to stop it.
    pub fn new(
        store: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        reset_hour: u32,
    ) -> (Self, watch::Sender<bool>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let scheduler = Self {
            store,
            clock,
            reset_hour,
            shutdown: shutdown_rx,
        };

        (scheduler, shutdown_tx)
    }

    /// Run until a shutdown signal is received or the sender is dropped
    pub async fn run(mut self) {
        info!(reset_hour = self.reset_hour, "Starting seat reset scheduler");

        while !*self.shutdown.borrow() {
            let now = self.clock.now();
            let next = next_reset_after(&now, self.reset_hour);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_reset = %next, wait_seconds = wait.as_secs(), "Waiting for next seat reset");

            tokio::select! {
                () = tokio::time::sleep(wait) => {}
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            match self.store.reset_occupied().await {
                Ok(rows) => info!(rows_affected = rows, "Seats reset to available"),
                Err(e) => error!(error = %e, "Seat reset failed, retrying at next scheduled time"),
            }
        }

        info!("Seat reset scheduler stopped");
    }
}
