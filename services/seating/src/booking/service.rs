//! Seat booking submission

use chrono::DateTime;
use chrono_tz::Tz;
use common::error::DatabaseError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::window::BookingWindow;
use crate::{
    models::{ActivityLogEntry, BookingRequest, NewBooking},
    repositories::BookingStore,
};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Bookings are only accepted between {open:02}:00 and {close:02}:00")]
    OutsideWindow { open: u32, close: u32 },

    #[error("selected_seat is required")]
    MissingSeat,

    #[error("Seat {0} is already occupied")]
    SeatTaken(String),

    #[error("Booking store error: {0}")]
    Store(#[from] DatabaseError),
}

/// Gates submissions on the booking window and records them atomically
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    window: BookingWindow,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, window: BookingWindow) -> Self {
        Self { store, window }
    }

    pub fn store(&self) -> &Arc<dyn BookingStore> {
        &self.store
    }

    /// Fail with [`BookingError::OutsideWindow`] when `now` is outside the window
    pub fn ensure_open(&self, now: &DateTime<Tz>) -> Result<(), BookingError> {
        if self.window.allows(now) {
            return Ok(());
        }

        warn!(at = %now, "Booking outside window");
        Err(BookingError::OutsideWindow {
            open: self.window.open_hour,
            close: self.window.close_hour,
        })
    }

    /// Occupy the requested seat and return the paired audit entry
    ///
    /// Nothing is read or written when `now` falls outside the window.
    pub async fn submit(
        &self,
        request: BookingRequest,
        now: &DateTime<Tz>,
    ) -> Result<ActivityLogEntry, BookingError> {
        self.ensure_open(now)?;

        let seat = request.selected_seat.trim();
        if seat.is_empty() {
            return Err(BookingError::MissingSeat);
        }

        let booking = NewBooking {
            full_name: request.full_name,
            division_name: request.division_name,
            selected_seat: seat.to_string(),
        };

        let entry = self
            .store
            .claim_seat(&booking)
            .await?
            .ok_or_else(|| BookingError::SeatTaken(booking.selected_seat.clone()))?;

        info!(
            booking_id = entry.id,
            seat = %entry.selected_seat,
            division = %entry.division_name,
            "Seat booked"
        );
        Ok(entry)
    }
}
