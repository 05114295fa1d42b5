use axum::{
    Json,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::participant::{
    ParticipantResponse, RegisterParticipantRequest, UpdateParticipantRequest,
};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/events/{id}/register",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    request_body = RegisterParticipantRequest,
    responses(
        (status = 201, description = "Participant registered", body = ParticipantResponse),
        (status = 400, description = "Validation error or event restriction violated"),
        (status = 404, description = "Event not found")
    ),
    tag = "participants"
)]
pub async fn register_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RegisterParticipantRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;
    req.validate()?;

    let participant = services::register_participant(&state, &id, &req).await?;

    Ok((StatusCode::CREATED, Json(participant)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/participants",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    responses(
        (status = 200, description = "List the event's participants", body = Vec<ParticipantResponse>),
        (status = 404, description = "Event not found")
    ),
    tag = "participants"
)]
pub async fn list_participants(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let participants = services::list_participants(&state, &id).await?;

    Ok(Json(participants).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/participants/{participant_id}",
    params(
        ("id" = String, Path, description = "Event key or id"),
        ("participant_id" = String, Path, description = "Participant id")
    ),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "Participant updated", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event or participant not found")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(state): State<AppState>,
    Path((id, participant_id)): Path<(String, String)>,
    body: Result<Json<UpdateParticipantRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;
    req.validate()?;

    let participant = services::update_participant(&state, &id, &participant_id, &req).await?;

    Ok(Json(participant).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}/participants/{participant_id}",
    params(
        ("id" = String, Path, description = "Event key or id"),
        ("participant_id" = String, Path, description = "Participant id")
    ),
    responses(
        (status = 204, description = "Participant deleted"),
        (status = 404, description = "Event or participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(state): State<AppState>,
    Path((id, participant_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    services::delete_participant(&state, &id, &participant_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
