//! Identity service routes

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    error::AuthError,
    middleware::{require_admin, require_auth},
    models::{LoginCredentials, RegisterRequest, User},
    service::IdentityService,
};

/// Response for user login
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

/// `?id=` query used by delete endpoints
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

/// Create the router for registration, login, and user administration
pub fn create_router(identity: IdentityService) -> Router {
    let jwt = identity.jwt().clone();

    let member_routes = Router::new()
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(jwt.clone(), require_auth));

    let admin_routes = Router::new()
        .route("/admin/users", get(list_users))
        .route("/users/delete", post(delete_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(jwt, require_admin));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(member_routes)
        .merge(admin_routes)
        .with_state(identity)
}

/// User registration endpoint
pub async fn register(
    State(identity): State<IdentityService>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let user = identity.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// User login endpoint
pub async fn login(
    State(identity): State<IdentityService>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, AuthError> {
    info!(username = %payload.username, "Login attempt");
    let issued = identity.login(payload).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
        user: issued.user,
    }))
}

/// List all accounts
pub async fn list_users(
    State(identity): State<IdentityService>,
) -> Result<impl IntoResponse, AuthError> {
    let users = identity.users().list().await?;
    Ok(Json(users))
}

/// Delete an account by `?id=`
pub async fn delete_user(
    State(identity): State<IdentityService>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AuthError> {
    let id = query
        .id
        .ok_or_else(|| AuthError::MissingParameter("User ID".to_string()))?;

    if !identity.users().delete(id).await? {
        return Err(AuthError::NotFound("User".to_string()));
    }

    info!(user_id = id, "User deleted");
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
