//! Booking lifecycle: the time-window gate, seat submission, and the daily reset

pub mod scheduler;
pub mod service;
pub mod window;

pub use scheduler::{SeatResetScheduler, next_reset_after};
pub use service::{BookingError, BookingService};
pub use window::BookingWindow;
