use axum::{
    Json,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::result::{RecordResultsRequest, ResultResponse};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/events/{id}/results",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    request_body = RecordResultsRequest,
    responses(
        (status = 201, description = "Results recorded", body = Vec<ResultResponse>),
        (status = 400, description = "Validation error or event is not a race"),
        (status = 404, description = "Event not found")
    ),
    tag = "results"
)]
pub async fn record_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RecordResultsRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;
    req.validate()?;

    let recorded = services::record_results(&state, &id, &req).await?;

    Ok((StatusCode::CREATED, Json(recorded)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/results",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    responses(
        (status = 200, description = "List the event's results", body = Vec<ResultResponse>),
        (status = 404, description = "Event not found")
    ),
    tag = "results"
)]
pub async fn list_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let results = services::list_results(&state, &id).await?;

    Ok(Json(results).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}/results/{date}",
    params(
        ("id" = String, Path, description = "Event key or id"),
        ("date" = String, Path, description = "Occurrence date, DDMMYYYY")
    ),
    responses(
        (status = 204, description = "Results group deleted"),
        (status = 404, description = "Event not found, or no results on that date")
    ),
    tag = "results"
)]
pub async fn delete_results_group(
    State(state): State<AppState>,
    Path((id, date)): Path<(String, String)>,
) -> Result<Response, WebError> {
    services::delete_results_group(&state, &id, &date).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
