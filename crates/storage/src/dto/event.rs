use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub date: NaiveDate,

    #[validate(length(max = 32))]
    pub time: Option<String>,

    #[validate(length(max = 255))]
    pub place: Option<String>,

    pub is_race: bool,

    #[validate(custom(function = "validate_age_limit"))]
    pub age_limit: Option<String>,

    #[validate(range(min = 0, max = 17, message = "maxChildAge must be between 0 and 17"))]
    pub max_child_age: Option<i64>,

    #[serde(default)]
    pub medical_required: bool,

    #[serde(default)]
    pub team_event: bool,

    #[validate(length(max = 32))]
    pub gender_restriction: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Request payload for replacing an event's fields. The derived key and the
/// row id are immutable and stay as assigned at creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub date: NaiveDate,

    #[validate(length(max = 32))]
    pub time: Option<String>,

    #[validate(length(max = 255))]
    pub place: Option<String>,

    pub is_race: bool,

    #[validate(custom(function = "validate_age_limit"))]
    pub age_limit: Option<String>,

    #[validate(range(min = 0, max = 17))]
    pub max_child_age: Option<i64>,

    #[serde(default)]
    pub medical_required: bool,

    #[serde(default)]
    pub team_event: bool,

    #[validate(length(max = 32))]
    pub gender_restriction: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Response containing event details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub key: String,
    pub name: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub place: Option<String>,
    pub is_race: bool,
    pub age_limit: Option<String>,
    pub max_child_age: Option<i64>,
    pub medical_required: bool,
    pub team_event: bool,
    pub gender_restriction: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl EventResponse {
    pub fn from_event(event: crate::models::Event, logo_url: Option<String>) -> Self {
        Self {
            id: event.id,
            key: event.folder,
            name: event.name,
            date: event.date,
            time: event.time,
            place: event.place,
            is_race: event.is_race,
            age_limit: event.age_limit,
            max_child_age: event.max_child_age,
            medical_required: event.medical_required,
            team_event: event.team_event,
            gender_restriction: event.gender_restriction,
            description: event.description,
            logo_url,
        }
    }
}

/// Age limits are free text of the form "18+".
fn validate_age_limit(limit: &str) -> Result<(), validator::ValidationError> {
    match parse_age_limit(limit) {
        Some(_) => Ok(()),
        None => Err(validator::ValidationError::new("invalid_age_limit")),
    }
}

/// Parses the minimum age out of an `"N+"` age limit. Returns `None` for
/// anything that does not match that shape.
pub fn parse_age_limit(limit: &str) -> Option<i64> {
    limit.trim().strip_suffix('+')?.parse().ok()
}
