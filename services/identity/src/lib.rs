//! Identity service for the seating application
//!
//! Handles account registration with argon2-hashed passwords, credential
//! checks with per-username throttling, and stateless HS256 session tokens
//! carrying the username and role. The router exposes `/register`,
//! `/login`, and the user administration endpoints; the middleware guards
//! any other router that needs an authenticated or admin caller.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use error::{AuthError, AuthResult};
pub use middleware::{AuthUser, require_admin, require_auth};
pub use service::{IdentityService, IssuedToken};
