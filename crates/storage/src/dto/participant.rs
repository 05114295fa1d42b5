use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for registering a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParticipantRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Surname must be between 1 and 255 characters"
    ))]
    pub surname: String,

    #[validate(length(max = 32))]
    pub gender: Option<String>,

    #[validate(range(min = 1, max = 150, message = "Age must be between 1 and 150"))]
    pub age: i64,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,

    #[validate(length(max = 32))]
    pub phone: Option<String>,

    #[validate(length(max = 64))]
    pub race_role: Option<String>,
}

/// Request payload for a full-field participant update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    pub surname: String,

    #[validate(length(max = 32))]
    pub gender: Option<String>,

    #[validate(range(min = 1, max = 150))]
    pub age: i64,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 32))]
    pub phone: Option<String>,

    #[validate(length(max = 64))]
    pub race_role: Option<String>,
}

/// Response containing participant details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: String,
    pub event_key: String,
    pub name: String,
    pub surname: String,
    pub gender: Option<String>,
    pub age: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub race_role: Option<String>,
}

impl ParticipantResponse {
    pub fn from_participant(participant: crate::models::Participant, event_key: &str) -> Self {
        Self {
            id: participant.id,
            event_key: event_key.to_string(),
            name: participant.name,
            surname: participant.surname,
            gender: participant.gender,
            age: participant.age,
            email: participant.email,
            phone: participant.phone,
            race_role: participant.race_role,
        }
    }
}
