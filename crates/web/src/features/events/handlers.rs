use axum::{
    Json,
    extract::{FromRequest, Multipart, Path, Request, State},
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::dto::event::{CreateEventRequest, EventResponse, UpdateEventRequest};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "List all events successfully", body = Vec<EventResponse>)
    ),
    tag = "events"
)]
pub async fn list_events(State(state): State<AppState>) -> Result<Response, WebError> {
    let events = services::list_events(&state).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let event = services::get_event(&state, &id).await?;

    Ok(Json(event).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Event key already exists")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, WebError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    // The same endpoint accepts a plain JSON body or a multipart form
    // carrying the field values plus an optional logo image.
    let (body, logo) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|e| WebError::BadRequest(e.to_string()))?;
        event_from_multipart(multipart).await?
    } else {
        let Json(body) = Json::<CreateEventRequest>::from_request(req, &state)
            .await
            .map_err(|e| WebError::BadRequest(e.body_text()))?;
        (body, None)
    };

    body.validate()?;

    let event = services::create_event(&state, &body, logo.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated successfully", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;
    req.validate()?;

    let updated = services::update_event(&state, &id, &req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_event(&state, &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/logo",
    params(
        ("id" = String, Path, description = "Event key or id")
    ),
    responses(
        (status = 200, description = "Logo stored", body = EventResponse),
        (status = 400, description = "Missing logo file"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn upload_logo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let mut logo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("logo") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| WebError::BadRequest(e.to_string()))?;
            logo = Some(bytes);
        }
    }

    let bytes = logo.ok_or_else(|| WebError::BadRequest("Missing 'logo' file field".to_string()))?;

    let event = services::save_logo(&state, &id, &bytes).await?;

    Ok(Json(event).into_response())
}

async fn event_from_multipart(
    mut multipart: Multipart,
) -> Result<(CreateEventRequest, Option<Vec<u8>>), WebError> {
    let mut name = None;
    let mut date = None;
    let mut time = None;
    let mut place = None;
    let mut is_race = None;
    let mut age_limit = None;
    let mut max_child_age = None;
    let mut medical_required = false;
    let mut team_event = false;
    let mut gender_restriction = None;
    let mut description = None;
    let mut logo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.to_string()))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        if field_name == "logo" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| WebError::BadRequest(e.to_string()))?;
            logo = Some(bytes.to_vec());
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| WebError::BadRequest(e.to_string()))?;

        match field_name.as_str() {
            "name" => name = Some(value),
            "date" => date = Some(parse_date(&value)?),
            "time" => time = non_empty(value),
            "place" => place = non_empty(value),
            "isRace" => is_race = Some(parse_flag(&value)),
            "ageLimit" => age_limit = non_empty(value),
            "maxChildAge" => {
                max_child_age = Some(value.parse().map_err(|_| {
                    WebError::BadRequest("maxChildAge must be a number".to_string())
                })?)
            }
            "medicalRequired" => medical_required = parse_flag(&value),
            "teamEvent" => team_event = parse_flag(&value),
            "genderRestriction" => gender_restriction = non_empty(value),
            "description" => description = non_empty(value),
            _ => {}
        }
    }

    let request = CreateEventRequest {
        name: name.ok_or_else(|| missing("name"))?,
        date: date.ok_or_else(|| missing("date"))?,
        time,
        place,
        is_race: is_race.ok_or_else(|| missing("isRace"))?,
        age_limit,
        max_child_age,
        medical_required,
        team_event,
        gender_restriction,
        description,
    };

    Ok((request, logo))
}

fn missing(field: &str) -> WebError {
    WebError::BadRequest(format!("Missing required field '{field}'"))
}

fn parse_date(value: &str) -> Result<chrono::NaiveDate, WebError> {
    value
        .parse()
        .map_err(|_| WebError::BadRequest("date must be formatted as YYYY-MM-DD".to_string()))
}

// CSV exports historically used "yes" for the boolean columns, so the form
// fields accept that alongside the usual spellings.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "on"
    )
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}
