//! Middleware for session token validation and role checks

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{error::AuthError, jwt::JwtService, models::Role};

/// Authenticated caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

fn bearer_token(req: &Request<Body>) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)
}

fn authenticate(jwt: &JwtService, req: &Request<Body>) -> Result<AuthUser, AuthError> {
    let token = bearer_token(req)?;
    let claims = jwt.validate_token(token).map_err(|e| {
        warn!(error = %e, "Rejected session token");
        AuthError::InvalidToken
    })?;

    Ok(AuthUser {
        id: claims.uid,
        username: claims.sub,
        role: claims.role,
    })
}

/// Require a valid session token
pub async fn require_auth(
    State(jwt): State<JwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(&jwt, &req)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require a valid session token whose role is `admin`
pub async fn require_admin(
    State(jwt): State<JwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(&jwt, &req)?;
    if !user.role.is_admin() {
        warn!(username = %user.username, path = %req.uri().path(), "Non-admin on admin route");
        return Err(AuthError::Forbidden);
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
