//! Seat booking and activity log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Occupancy state of a seat booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
}

impl SeatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Occupied => "occupied",
        }
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SeatStatus::Available),
            "occupied" => Ok(SeatStatus::Occupied),
            other => Err(format!("unknown seat status: {}", other)),
        }
    }
}

/// Booking submission as received over HTTP
///
/// Missing text fields decode as empty strings. `status` is accepted for
/// older clients but ignored: a successful booking always occupies the seat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub division_name: String,
    #[serde(default)]
    pub selected_seat: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Validated booking ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub full_name: String,
    pub division_name: String,
    pub selected_seat: String,
}

/// Append-only audit row paired with a booking through a shared id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub full_name: String,
    pub division_name: String,
    pub selected_seat: String,
    pub status: SeatStatus,
    pub created_at: DateTime<Utc>,
}

/// `?booking_id=` query for a single booking's activity
#[derive(Debug, Deserialize)]
pub struct BookingActivityQuery {
    pub booking_id: Option<i64>,
}
