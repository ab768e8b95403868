//! Repositories for database operations
//!
//! Each store is a trait so the booking lifecycle and the HTTP layer can run
//! against PostgreSQL in production and in-memory stores in tests.

pub mod booking;
pub mod contact;
pub mod event;

pub use booking::{BookingStore, PgBookingStore};
pub use contact::{ContactStore, PgContactStore};
pub use event::{EventStore, PgEventStore};
