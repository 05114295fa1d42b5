use axum::{
    Router,
    routing::{delete, post},
};

use super::handlers::{delete_results_group, list_results, record_results};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id/results", post(record_results).get(list_results))
        .route("/:id/results/:date", delete(delete_results_group))
}
