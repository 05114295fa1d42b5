use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One entry of a results batch
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[validate(length(min = 1, max = 64, message = "participantId must not be empty"))]
    pub participant_id: String,

    #[validate(length(min = 1, max = 64, message = "time must not be empty"))]
    pub time: String,
}

/// Request payload for recording a batch of results.
///
/// `date` defaults to today (`DDMMYYYY`) and `raceId` to one past the
/// highest race already recorded for that event and date.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResultsRequest {
    pub date: Option<String>,

    pub race_id: Option<i64>,

    #[validate(length(min = 1, message = "items must be a non-empty list"), nested)]
    pub items: Vec<ResultItem>,
}

/// Response containing one recorded result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub event_key: String,
    pub date: String,
    pub race_id: i64,
    pub participant_id: String,
    pub time: String,
}

impl ResultResponse {
    pub fn from_result(result: crate::models::RaceResult, event_key: &str) -> Self {
        Self {
            event_key: event_key.to_string(),
            date: result.date,
            race_id: result.race_id,
            participant_id: result.participant_id,
            time: result.time,
        }
    }
}

/// Occurrence dates are eight digits, `DDMMYYYY`.
pub fn is_valid_occurrence_date(date: &str) -> bool {
    date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit())
}
