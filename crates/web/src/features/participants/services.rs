use storage::dto::event::parse_age_limit;
use storage::dto::participant::{
    ParticipantResponse, RegisterParticipantRequest, UpdateParticipantRequest,
};
use storage::models::Event;
use storage::repository::participant::ParticipantRepository;

use crate::AppState;
use crate::error::{WebError, WebResult};
use crate::features::events::services::resolve_event;

/// Register a participant, enforcing the restrictions declared on the event
pub async fn register_participant(
    state: &AppState,
    id_or_key: &str,
    req: &RegisterParticipantRequest,
) -> WebResult<ParticipantResponse> {
    let event = resolve_event(state, id_or_key).await?;

    check_event_restrictions(&event, req.age, req.gender.as_deref(), req.race_role.as_deref())?;

    let participant = ParticipantRepository::new(state.db.pool())
        .register(&event.id, req)
        .await?;

    Ok(ParticipantResponse::from_participant(
        participant,
        &event.folder,
    ))
}

/// List the participants of an event
pub async fn list_participants(
    state: &AppState,
    id_or_key: &str,
) -> WebResult<Vec<ParticipantResponse>> {
    let event = resolve_event(state, id_or_key).await?;

    let participants = ParticipantRepository::new(state.db.pool())
        .list(&event.id)
        .await?;

    Ok(participants
        .into_iter()
        .map(|p| ParticipantResponse::from_participant(p, &event.folder))
        .collect())
}

/// Replace a participant's fields. The replacement is held to the same
/// event restrictions as a fresh registration.
pub async fn update_participant(
    state: &AppState,
    id_or_key: &str,
    participant_id: &str,
    req: &UpdateParticipantRequest,
) -> WebResult<ParticipantResponse> {
    let event = resolve_event(state, id_or_key).await?;

    check_event_restrictions(&event, req.age, req.gender.as_deref(), req.race_role.as_deref())?;

    let participant = ParticipantRepository::new(state.db.pool())
        .update(participant_id, &event.id, req)
        .await?;

    Ok(ParticipantResponse::from_participant(
        participant,
        &event.folder,
    ))
}

/// Delete one participant
pub async fn delete_participant(
    state: &AppState,
    id_or_key: &str,
    participant_id: &str,
) -> WebResult<()> {
    let event = resolve_event(state, id_or_key).await?;

    ParticipantRepository::new(state.db.pool())
        .delete(participant_id, &event.id)
        .await?;

    Ok(())
}

/// Registrations must satisfy the restrictions declared on the event:
/// a minimum age limit, a gender restriction (undeclared gender cannot be
/// verified and is rejected too), and race roles only on races.
fn check_event_restrictions(
    event: &Event,
    age: i64,
    gender: Option<&str>,
    race_role: Option<&str>,
) -> WebResult<()> {
    if let Some(min_age) = event.age_limit.as_deref().and_then(parse_age_limit) {
        if age < min_age {
            return Err(WebError::BadRequest(format!(
                "Event '{}' requires participants to be at least {} years old",
                event.name, min_age
            )));
        }
    }

    if let Some(required) = event.gender_restriction.as_deref() {
        let matches = gender.is_some_and(|g| g.eq_ignore_ascii_case(required));
        if !matches {
            return Err(WebError::BadRequest(format!(
                "Event '{}' is restricted to gender '{}'",
                event.name, required
            )));
        }
    }

    if race_role.is_some() && !event.is_race {
        return Err(WebError::BadRequest(
            "raceRole is only accepted for race events".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        Event {
            id: "e1".to_string(),
            folder: "20250601_springrun".to_string(),
            name: "Spring Run".to_string(),
            date: "2025-06-01".parse().unwrap(),
            time: None,
            place: None,
            is_race: true,
            age_limit: None,
            max_child_age: None,
            medical_required: false,
            team_event: false,
            gender_restriction: None,
            description: None,
        }
    }

    #[test]
    fn test_unrestricted_event_accepts_anyone() {
        assert!(check_event_restrictions(&event(), 30, None, None).is_ok());
    }

    #[test]
    fn test_age_limit_rejects_younger() {
        let mut event = event();
        event.age_limit = Some("18+".to_string());

        assert!(check_event_restrictions(&event, 17, None, None).is_err());
        assert!(check_event_restrictions(&event, 18, None, None).is_ok());
    }

    #[test]
    fn test_gender_restriction_requires_matching_declared_gender() {
        let mut event = event();
        event.gender_restriction = Some("F".to_string());

        assert!(check_event_restrictions(&event, 30, Some("f"), None).is_ok());
        assert!(check_event_restrictions(&event, 30, Some("M"), None).is_err());
        assert!(check_event_restrictions(&event, 30, None, None).is_err());
    }

    #[test]
    fn test_race_role_only_on_races() {
        let mut event = event();
        event.is_race = false;

        assert!(check_event_restrictions(&event, 30, None, Some("pacer")).is_err());
        assert!(check_event_restrictions(&event, 30, None, None).is_ok());
    }
}
