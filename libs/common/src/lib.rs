//! Shared infrastructure for the seating services
//!
//! [`database`] builds the PostgreSQL pool from the environment and checks
//! that it answers. [`error::DatabaseError`] is the one error type every
//! store reports through, so the HTTP layers can map a taken username or an
//! occupied seat to a conflict and everything else to a generic failure.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//! use common::error::DatabaseError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let pool = init_pool(&DatabaseConfig::from_env()?).await?;
//!     if !health_check(&pool).await? {
//!         return Err(DatabaseError::Unavailable("no answer to SELECT 1".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
