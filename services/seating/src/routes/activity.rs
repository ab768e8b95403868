//! Activity log administration

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::IdQuery,
    state::AppState,
};

pub async fn list_activity(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let entries = state.bookings.store().activity_log().await?;
    Ok(Json(entries))
}

/// Delete one audit entry by `?id=`; the booking row is kept
pub async fn delete_activity(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<impl IntoResponse> {
    let id = query
        .id
        .ok_or_else(|| ApiError::MissingParameter("Log activity ID".to_string()))?;

    if !state.bookings.store().delete_activity(id).await? {
        return Err(ApiError::NotFound("Log activity".to_string()));
    }

    info!(activity_id = id, "Activity log entry deleted");
    Ok(Json(json!({ "message": "Log activity deleted successfully" })))
}
