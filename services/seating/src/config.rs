//! Application configuration loaded from the environment

use chrono_tz::Tz;
use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid APP_TIMEZONE: {0}")]
    InvalidTimezone(String),

    #[error("Invalid booking hours: {0}")]
    InvalidHours(String),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    server_addr: String,
    app_timezone: String,
    booking_open_hour: u32,
    booking_close_hour: u32,
    seat_reset_hour: u32,
    allow_admin_signup: bool,
}

/// Settings for the HTTP server, the booking window, and the daily reset
///
/// # Environment Variables
///
/// - `SERVER_ADDR`: listen address (default `0.0.0.0:8080`)
/// - `APP_TIMEZONE`: IANA zone defining local time (default `UTC`)
/// - `BOOKING_OPEN_HOUR`: first hour bookings are accepted (default 7)
/// - `BOOKING_CLOSE_HOUR`: hour bookings stop being accepted (default 20)
/// - `SEAT_RESET_HOUR`: local hour occupied seats are freed (default 20)
/// - `ALLOW_ADMIN_SIGNUP`: let `/register` create admin accounts (default false)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: String,
    pub timezone: Tz,
    pub booking_open_hour: u32,
    pub booking_close_hour: u32,
    pub seat_reset_hour: u32,
    pub allow_admin_signup: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let raw: RawConfig = Config::builder()
            .set_default("server_addr", "0.0.0.0:8080")?
            .set_default("app_timezone", "UTC")?
            .set_default("booking_open_hour", 7_i64)?
            .set_default("booking_close_hour", 20_i64)?
            .set_default("seat_reset_hour", 20_i64)?
            .set_default("allow_admin_signup", false)?
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?;

        let timezone = raw
            .app_timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(raw.app_timezone.clone()))?;

        let config = Self {
            server_addr: raw.server_addr,
            timezone,
            booking_open_hour: raw.booking_open_hour,
            booking_close_hour: raw.booking_close_hour,
            seat_reset_hour: raw.seat_reset_hour,
            allow_admin_signup: raw.allow_admin_signup,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.booking_open_hour >= self.booking_close_hour || self.booking_close_hour > 24 {
            return Err(ConfigError::InvalidHours(format!(
                "open {} must be before close {}, and close at most 24",
                self.booking_open_hour, self.booking_close_hour
            )));
        }
        if self.seat_reset_hour >= 24 {
            return Err(ConfigError::InvalidHours(format!(
                "reset hour {} must be below 24",
                self.seat_reset_hour
            )));
        }
        Ok(())
    }
}
