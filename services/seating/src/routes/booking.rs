//! Booking submission and seat occupancy endpoints

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{BookingRequest, booking::BookingActivityQuery},
    state::AppState,
};

/// Submit a seat booking; gated on the local booking window
///
/// The body is decoded only once the window is open, so a closed window
/// answers 403 whatever the payload.
pub async fn submit_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let now = state.clock.now();
    state.bookings.ensure_open(&now)?;

    let payload: BookingRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid booking body: {}", e)))?;
    let entry = state.bookings.submit(payload, &now).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn occupied_seats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let seats = state.bookings.store().occupied_seats().await?;
    Ok(Json(seats))
}

/// Audit entries recorded for `?booking_id=`
pub async fn booking_activity(
    State(state): State<AppState>,
    Query(query): Query<BookingActivityQuery>,
) -> ApiResult<impl IntoResponse> {
    let booking_id = query
        .booking_id
        .ok_or_else(|| ApiError::MissingParameter("Booking ID".to_string()))?;

    let entries = state
        .bookings
        .store()
        .activity_for_booking(booking_id)
        .await?;
    Ok(Json(entries))
}
