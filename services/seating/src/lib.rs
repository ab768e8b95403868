//! Seating service
//!
//! Seat bookings gated on a local-time window, an append-only activity log,
//! a daily reset that frees every occupied seat, and the small event and
//! contact endpoints around them. Accounts and session tokens come from the
//! `identity` crate, whose router is merged into [`routes::create_router`].

pub mod booking;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod state;

#[cfg(test)]
mod memory;

pub use state::AppState;
