//! Event endpoints

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{EventPayload, IdQuery},
    state::AppState,
};

fn required_id(query: IdQuery) -> ApiResult<i64> {
    query
        .id
        .ok_or_else(|| ApiError::MissingParameter("Event ID".to_string()))
}

pub async fn list_events(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.events.list().await?))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<impl IntoResponse> {
    let event = state.events.create(&payload).await?;
    info!(event_id = event.id, name = %event.name, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<impl IntoResponse> {
    let id = required_id(query)?;
    let event = state
        .events
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event".to_string()))?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<impl IntoResponse> {
    let id = required_id(query)?;
    if !state.events.delete(id).await? {
        return Err(ApiError::NotFound("Event".to_string()));
    }

    info!(event_id = id, "Event deleted");
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
