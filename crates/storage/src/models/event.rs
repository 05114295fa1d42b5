use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: String,
    pub folder: String,
    pub name: String,
    pub date: chrono::NaiveDate,
    pub time: Option<String>,
    pub place: Option<String>,
    pub is_race: bool,
    pub age_limit: Option<String>,
    pub max_child_age: Option<i64>,
    pub medical_required: bool,
    pub team_event: bool,
    pub gender_restriction: Option<String>,
    pub description: Option<String>,
}
