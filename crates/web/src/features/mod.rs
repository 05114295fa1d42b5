pub mod events;
pub mod participants;
pub mod results;

use axum::Router;

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(participants::routes())
        .merge(results::routes())
}
