use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::event::{CreateEventRequest, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::{Event, EventKey};

const EVENT_COLUMNS: &str = "id, folder, name, date, time, place, is_race, age_limit, \
     max_child_age, medical_required, team_event, gender_restriction, description";

/// Repository for event database operations
pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all events, soonest first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Get an event by its derived key
    pub async fn find_by_key(&self, key: &str) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE folder = $1"
        ))
        .bind(key)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Resolve an external identifier, which may be either the derived key
    /// or the opaque row id
    pub async fn resolve(&self, id_or_key: &str) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE folder = $1 OR id = $2"
        ))
        .bind(id_or_key)
        .bind(id_or_key)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Create a new event. The key is derived from the date and name and the
    /// id is generated here, so rapid duplicate submissions cannot race for
    /// the same identifier.
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let id = Uuid::new_v4().to_string();
        let key = EventKey::derive(req.date, &req.name);

        let event = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (
                 id, folder, name, date, time, place, is_race, age_limit,
                 max_child_age, medical_required, team_event, gender_restriction, description
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&id)
        .bind(key.as_str())
        .bind(&req.name)
        .bind(req.date)
        .bind(&req.time)
        .bind(&req.place)
        .bind(req.is_race)
        .bind(&req.age_limit)
        .bind(req.max_child_age)
        .bind(req.medical_required)
        .bind(req.team_event)
        .bind(&req.gender_restriction)
        .bind(&req.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            // Unique violation on the folder column means a same-day event
            // with a name that collapses to the same key.
            if let sqlx::Error::Database(ref db_err) = e {
                if matches!(db_err.code().as_deref(), Some("2067") | Some("1555")) {
                    return StorageError::Conflict(format!("Event key '{key}' already exists"));
                }
            }
            StorageError::from(e)
        })?;

        Ok(event)
    }

    /// Replace every mutable field of an event. The key and id never change,
    /// even when the name or date the key was derived from do.
    pub async fn update(&self, id: &str, req: &UpdateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events
             SET name = $2,
                 date = $3,
                 time = $4,
                 place = $5,
                 is_race = $6,
                 age_limit = $7,
                 max_child_age = $8,
                 medical_required = $9,
                 team_event = $10,
                 gender_restriction = $11,
                 description = $12
             WHERE id = $1
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&req.name)
        .bind(req.date)
        .bind(&req.time)
        .bind(&req.place)
        .bind(req.is_race)
        .bind(&req.age_limit)
        .bind(req.max_child_age)
        .bind(req.medical_required)
        .bind(req.team_event)
        .bind(&req.gender_restriction)
        .bind(&req.description)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Delete an event by id. Participants and results go with it.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
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
    use crate::repository::testing::{race_event, test_db};

    #[tokio::test]
    async fn test_create_then_find_by_key_round_trips() {
        let db = test_db().await;
        let repo = EventRepository::new(db.pool());

        let created = repo.create(&race_event("Spring Run", "2025-06-01")).await.unwrap();
        assert_eq!(created.folder, "20250601_springrun");

        let fetched = repo.find_by_key("20250601_springrun").await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Spring Run");
        assert!(fetched.is_race);
    }

    #[tokio::test]
    async fn test_resolve_accepts_key_or_id() {
        let db = test_db().await;
        let repo = EventRepository::new(db.pool());

        let created = repo.create(&race_event("Spring Run", "2025-06-01")).await.unwrap();

        let by_key = repo.resolve(&created.folder).await.unwrap();
        let by_id = repo.resolve(&created.id).await.unwrap();
        assert_eq!(by_key.id, by_id.id);
    }

    #[tokio::test]
    async fn test_duplicate_key_conflicts() {
        let db = test_db().await;
        let repo = EventRepository::new(db.pool());

        repo.create(&race_event("Spring Run", "2025-06-01")).await.unwrap();
        let err = repo
            .create(&race_event("spring RUN", "2025-06-01"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_date() {
        let db = test_db().await;
        let repo = EventRepository::new(db.pool());

        repo.create(&race_event("Later", "2025-09-01")).await.unwrap();
        repo.create(&race_event("Sooner", "2025-02-01")).await.unwrap();

        let events = repo.list().await.unwrap();
        assert_eq!(
            events.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["Sooner", "Later"]
        );
    }

    #[tokio::test]
    async fn test_update_keeps_key_immutable() {
        let db = test_db().await;
        let repo = EventRepository::new(db.pool());

        let created = repo.create(&race_event("Spring Run", "2025-06-01")).await.unwrap();

        let mut req = crate::repository::testing::update_from(&race_event("Renamed Run", "2025-07-15"));
        req.place = Some("Riverside park".to_string());
        let updated = repo.update(&created.id, &req).await.unwrap();

        assert_eq!(updated.name, "Renamed Run");
        assert_eq!(updated.folder, "20250601_springrun");
        assert_eq!(updated.place.as_deref(), Some("Riverside park"));
    }

    #[tokio::test]
    async fn test_delete_missing_event_is_not_found() {
        let db = test_db().await;
        let repo = EventRepository::new(db.pool());

        let err = repo.delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
