use storage::dto::event::{CreateEventRequest, EventResponse, UpdateEventRequest};
use storage::models::Event;
use storage::repository::event::EventRepository;

use crate::AppState;
use crate::error::WebResult;

/// Resolve the external identifier (derived key or opaque id) to the
/// canonical event
pub async fn resolve_event(state: &AppState, id_or_key: &str) -> WebResult<Event> {
    let event = EventRepository::new(state.db.pool())
        .resolve(id_or_key)
        .await?;
    Ok(event)
}

/// List all events
pub async fn list_events(state: &AppState) -> WebResult<Vec<EventResponse>> {
    let events = EventRepository::new(state.db.pool()).list().await?;

    Ok(events
        .into_iter()
        .map(|event| {
            let logo_url = state.assets.logo_url(&event.folder);
            EventResponse::from_event(event, logo_url)
        })
        .collect())
}

/// Get one event by key or id
pub async fn get_event(state: &AppState, id_or_key: &str) -> WebResult<EventResponse> {
    let event = resolve_event(state, id_or_key).await?;
    let logo_url = state.assets.logo_url(&event.folder);

    Ok(EventResponse::from_event(event, logo_url))
}

/// Create a new event, storing its logo when one came with the request
pub async fn create_event(
    state: &AppState,
    req: &CreateEventRequest,
    logo: Option<&[u8]>,
) -> WebResult<EventResponse> {
    let event = EventRepository::new(state.db.pool()).create(req).await?;

    if let Some(bytes) = logo {
        state.assets.save_logo(&event.folder, bytes).await?;
    }

    let logo_url = state.assets.logo_url(&event.folder);
    Ok(EventResponse::from_event(event, logo_url))
}

/// Replace an event's fields
pub async fn update_event(
    state: &AppState,
    id_or_key: &str,
    req: &UpdateEventRequest,
) -> WebResult<EventResponse> {
    let event = resolve_event(state, id_or_key).await?;
    let updated = EventRepository::new(state.db.pool())
        .update(&event.id, req)
        .await?;

    let logo_url = state.assets.logo_url(&updated.folder);
    Ok(EventResponse::from_event(updated, logo_url))
}

/// Delete an event together with its participants, results and assets
pub async fn delete_event(state: &AppState, id_or_key: &str) -> WebResult<()> {
    let event = resolve_event(state, id_or_key).await?;

    EventRepository::new(state.db.pool())
        .delete(&event.id)
        .await?;
    state.assets.remove_event_assets(&event.folder).await?;

    Ok(())
}

/// Store or replace the event's logo image
pub async fn save_logo(state: &AppState, id_or_key: &str, bytes: &[u8]) -> WebResult<EventResponse> {
    let event = resolve_event(state, id_or_key).await?;

    state.assets.save_logo(&event.folder, bytes).await?;

    let logo_url = state.assets.logo_url(&event.folder);
    Ok(EventResponse::from_event(event, logo_url))
}
