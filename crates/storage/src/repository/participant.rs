use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::participant::{RegisterParticipantRequest, UpdateParticipantRequest};
use crate::error::{Result, StorageError};
use crate::models::Participant;

const PARTICIPANT_COLUMNS: &str =
    "id, event_id, name, surname, gender, age, email, phone, race_role";

/// Repository for participant database operations. Every operation is scoped
/// to an owning event; callers resolve the event first.
pub struct ParticipantRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a participant for an event. The id is generated at write
    /// time rather than derived from the clock, so concurrent registrations
    /// cannot collide.
    pub async fn register(
        &self,
        event_id: &str,
        req: &RegisterParticipantRequest,
    ) -> Result<Participant> {
        let id = Uuid::new_v4().to_string();

        let participant = sqlx::query_as::<_, Participant>(&format!(
            "INSERT INTO participants (id, event_id, name, surname, gender, age, email, phone, race_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(&id)
        .bind(event_id)
        .bind(&req.name)
        .bind(&req.surname)
        .bind(&req.gender)
        .bind(req.age)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.race_role)
        .fetch_one(self.pool)
        .await?;

        Ok(participant)
    }

    /// List the participants of an event, ordered by id
    pub async fn list(&self, event_id: &str) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE event_id = $1 ORDER BY id"
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    /// Replace every field of a participant
    pub async fn update(
        &self,
        id: &str,
        event_id: &str,
        req: &UpdateParticipantRequest,
    ) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "UPDATE participants
             SET name = $3,
                 surname = $4,
                 gender = $5,
                 age = $6,
                 email = $7,
                 phone = $8,
                 race_role = $9
             WHERE id = $1 AND event_id = $2
             RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(id)
        .bind(event_id)
        .bind(&req.name)
        .bind(&req.surname)
        .bind(&req.gender)
        .bind(req.age)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.race_role)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Delete a participant. Results that reference the participant keep
    /// their copied id.
    pub async fn delete(&self, id: &str, event_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::event::EventRepository;
    use crate::repository::testing::{race_event, registration, test_db};

    #[tokio::test]
    async fn test_register_and_list() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ParticipantRepository::new(db.pool());

        let anna = repo.register(&event.id, &registration("Anna", "Koval", 24)).await.unwrap();
        let borys = repo.register(&event.id, &registration("Borys", "Shevchenko", 31)).await.unwrap();
        assert_ne!(anna.id, borys.id);

        let listed = repo.list(&event.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        let mut ids: Vec<String> = listed.iter().map(|p| p.id.clone()).collect();
        let sorted = {
            let mut s = ids.clone();
            s.sort();
            s
        };
        assert_eq!(ids, sorted);
        ids.dedup();
        assert_eq!(ids.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ParticipantRepository::new(db.pool());

        let mut initial = registration("Anna", "Koval", 24);
        initial.email = Some("anna@example.com".to_string());
        let created = repo.register(&event.id, &initial).await.unwrap();

        let replacement = UpdateParticipantRequest {
            name: "Hanna".to_string(),
            surname: "Kovalenko".to_string(),
            gender: Some("F".to_string()),
            age: 25,
            email: None,
            phone: None,
            race_role: None,
        };
        let updated = repo.update(&created.id, &event.id, &replacement).await.unwrap();

        assert_eq!(updated.name, "Hanna");
        assert_eq!(updated.age, 25);
        // Full replace: fields absent from the update are cleared.
        assert_eq!(updated.email, None);
    }

    #[tokio::test]
    async fn test_update_wrong_event_is_not_found() {
        let db = test_db().await;
        let events = EventRepository::new(db.pool());
        let event = events.create(&race_event("Spring Run", "2025-06-01")).await.unwrap();
        let other = events.create(&race_event("Autumn Run", "2025-10-01")).await.unwrap();
        let repo = ParticipantRepository::new(db.pool());

        let created = repo.register(&event.id, &registration("Anna", "Koval", 24)).await.unwrap();

        let replacement = UpdateParticipantRequest {
            name: "Anna".to_string(),
            surname: "Koval".to_string(),
            gender: None,
            age: 24,
            email: None,
            phone: None,
            race_role: None,
        };
        let err = repo.update(&created.id, &other.id, &replacement).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_event_delete_cascades_to_participants() {
        let db = test_db().await;
        let events = EventRepository::new(db.pool());
        let event = events.create(&race_event("Spring Run", "2025-06-01")).await.unwrap();
        let repo = ParticipantRepository::new(db.pool());

        repo.register(&event.id, &registration("Anna", "Koval", 24)).await.unwrap();
        events.delete(&event.id).await.unwrap();

        let listed = repo.list(&event.id).await.unwrap();
        assert!(listed.is_empty());
    }
}
