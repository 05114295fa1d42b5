use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{
    create_event, delete_event, get_event, list_events, update_event, upload_logo,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/:id/logo", post(upload_logo))
}
