//! JWT service for session token generation and validation
//!
//! Session tokens are stateless HS256-signed claim sets carrying the
//! username and role. The server keeps no session table, so a token stays
//! valid until it expires.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Role, User};

/// Default session lifetime in hours
pub const DEFAULT_TOKEN_EXPIRY_HOURS: u64 = 72;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Token lifetime in seconds (default: 72 hours)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared signing secret (required, must not be empty)
    /// - `JWT_TOKEN_EXPIRY_HOURS`: Token lifetime in hours (default: 72)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        if secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let expiry_hours: u64 = match std::env::var("JWT_TOKEN_EXPIRY_HOURS") {
            Ok(value) => value.trim().parse().map_err(|_| {
                anyhow::anyhow!("JWT_TOKEN_EXPIRY_HOURS must be a whole number of hours, got {value:?}")
            })?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };

        if expiry_hours == 0 {
            anyhow::bail!("JWT_TOKEN_EXPIRY_HOURS must be at least 1");
        }

        let token_expiry = expiry_hours
            .checked_mul(3600)
            .ok_or_else(|| anyhow::anyhow!("JWT_TOKEN_EXPIRY_HOURS is too large: {expiry_hours}"))?;

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// User ID
    pub uid: i64,
    /// Account role
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Generate a session token for a user
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user.username.clone(),
            uid: user.id,
            role: user.role,
            iat: now,
            exp: now
                .checked_add(self.config.token_expiry)
                .ok_or_else(|| anyhow::anyhow!("Token expiry overflows the clock"))?,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    ///
    /// Rejects a bad signature, any algorithm other than HS256, and expired tokens.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the token expiry time in seconds
    pub fn token_expiry(&self) -> u64 {
        self.config.token_expiry
    }
}
