//! Identity service: registration, credential checks, and token issuance

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{AuthError, AuthResult},
    jwt::{Claims, JwtService},
    models::{LoginCredentials, NewUser, RegisterRequest, Role, User},
    password::{hash_password, verify_password},
    rate_limiter::RateLimiter,
    repositories::UserStore,
    validation::{validate_full_name, validate_password, validate_username},
};
use common::error::DatabaseError;

/// Successful login outcome
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
    pub user: User,
}

/// Identity service shared across handlers
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserStore>,
    jwt: JwtService,
    rate_limiter: RateLimiter,
    allow_admin_signup: bool,
}

impl IdentityService {
    /// Self-registration is limited to `member` until [`Self::with_admin_signup`] opens it
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtService, rate_limiter: RateLimiter) -> Self {
        Self {
            users,
            jwt,
            rate_limiter,
            allow_admin_signup: false,
        }
    }

    /// Allow `/register` to create `admin` accounts
    pub fn with_admin_signup(mut self, allow: bool) -> Self {
        self.allow_admin_signup = allow;
        self
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Create an account with a salted argon2 hash of the password
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        let role = match request.role.as_deref() {
            None => Role::Member,
            Some(name) => name.parse::<Role>().map_err(|_| AuthError::InvalidRole)?,
        };

        if role.is_admin() && !self.allow_admin_signup {
            warn!(username = %request.username, "Admin self-registration refused");
            return Err(AuthError::AdminSignupDisabled);
        }

        validate_username(&request.username).map_err(AuthError::Validation)?;
        validate_full_name(&request.full_name).map_err(AuthError::Validation)?;
        validate_password(&request.password).map_err(AuthError::Validation)?;

        let new_user = NewUser {
            username: request.username,
            full_name: request.full_name.trim().to_string(),
            password_hash: hash_password(&request.password)?,
            role,
        };

        let user = self.users.create(&new_user).await.map_err(|e| match e {
            DatabaseError::Conflict(_) => AuthError::UsernameTaken,
            other => AuthError::Database(other),
        })?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a signed session token
    pub async fn login(&self, credentials: LoginCredentials) -> AuthResult<IssuedToken> {
        // Registration enforces these rules, so no stored account fails them.
        if validate_username(&credentials.username).is_err() {
            warn!(username_len = credentials.username.len(), "Login with malformed username");
            return Err(AuthError::InvalidCredentials);
        }

        if !self.rate_limiter.is_allowed(&credentials.username).await {
            return Err(AuthError::TooManyAttempts);
        }

        let user = self
            .users
            .find_by_username(&credentials.username)
            .await?
            .ok_or_else(|| {
                warn!(username = %credentials.username, "Login for unknown user");
                AuthError::InvalidCredentials
            })?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            warn!(username = %user.username, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.rate_limiter.reset(&credentials.username).await;

        let token = self.jwt.generate_token(&user)?;
        info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(IssuedToken {
            token,
            expires_in: self.jwt.token_expiry(),
            user,
        })
    }

    /// Verify a session token and return its claims
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        self.jwt
            .validate_token(token)
            .map_err(|_| AuthError::InvalidToken)
    }
}
