use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{error::ApiResult, models::Contact, state::AppState};

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(contact): Json<Contact>,
) -> ApiResult<impl IntoResponse> {
    state.contacts.save(&contact).await?;
    Ok(Json(json!({ "message": "Thank you for contacting us" })))
}

pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.contacts.list().await?))
}
