use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub surname: String,
    pub gender: Option<String>,
    pub age: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub race_role: Option<String>,
}
