use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One timed result row. Rows are grouped into races ("heats") by
/// `(event_id, date, race_id)`; `participant_id` is copied by value and is
/// not a live reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RaceResult {
    pub id: i64,
    pub event_id: String,
    pub date: String,
    pub race_id: i64,
    pub participant_id: String,
    pub time: String,
}
