//! Models for request and response payloads

pub mod booking;
pub mod contact;
pub mod event;

pub use booking::{ActivityLogEntry, BookingRequest, NewBooking, SeatStatus};
pub use contact::Contact;
pub use event::{Event, EventPayload};

use serde::Deserialize;

/// `?id=` query used by update and delete endpoints
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}
