//! Repositories for user persistence

pub mod user;

pub use user::{PgUserStore, UserStore};
