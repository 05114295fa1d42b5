use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers::{delete_participant, list_participants, register_participant, update_participant};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id/register", post(register_participant))
        .route("/:id/participants", get(list_participants))
        .route("/:id/participants/:participant_id", put(update_participant))
        .route("/:id/participants/:participant_id", delete(delete_participant))
}
