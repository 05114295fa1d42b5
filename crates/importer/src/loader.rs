use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{ImporterError, Result};
use crate::folders::{EventFolder, optional, parse_flag};

#[derive(Debug, Default)]
pub struct ImportCounts {
    pub events: u64,
    pub participants: u64,
    pub results: u64,
    pub skipped: u64,
}

/// Load one event folder into the database. Events and participants keep
/// their exported ids and are skipped when already present, so the importer
/// can be re-run over the same directory.
pub async fn load_event_folder(pool: &SqlitePool, folder: &EventFolder) -> Result<ImportCounts> {
    let mut counts = ImportCounts::default();
    let event = &folder.event;

    let date: chrono::NaiveDate = event.date.parse().map_err(|_| ImporterError::InvalidData {
        folder: folder.folder.clone(),
        message: format!("event date '{}' is not YYYY-MM-DD", event.date),
    })?;

    let exported_id = if event.id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        event.id.clone()
    };

    let inserted = sqlx::query(
        "INSERT OR IGNORE INTO events (
             id, folder, name, date, time, place, is_race, age_limit,
             max_child_age, medical_required, team_event, gender_restriction, description
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(&exported_id)
    .bind(&folder.folder)
    .bind(&event.name)
    .bind(date)
    .bind(optional(&event.time))
    .bind(optional(&event.place))
    .bind(parse_flag(&event.is_race))
    .bind(optional(&event.age_limit))
    .bind(event.max_child_age.trim().parse::<i64>().ok())
    .bind(parse_flag(&event.medical_required))
    .bind(parse_flag(&event.team_event))
    .bind(optional(&event.gender_restriction))
    .bind(optional(&event.description))
    .execute(pool)
    .await?;
    counts.events += inserted.rows_affected();

    // On a re-run the folder may already be registered under a different id;
    // child rows must attach to the id that actually won.
    let event_id: String = sqlx::query_scalar("SELECT id FROM events WHERE folder = $1")
        .bind(&folder.folder)
        .fetch_one(pool)
        .await?;

    for p in &folder.participants {
        let Ok(age) = p.age.trim().parse::<i64>() else {
            tracing::warn!(
                folder = %folder.folder,
                participant = %p.name,
                "Skipping participant without a numeric age"
            );
            counts.skipped += 1;
            continue;
        };

        let id = if p.id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            p.id.clone()
        };

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO participants
                 (id, event_id, name, surname, gender, age, email, phone, race_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&id)
        .bind(&event_id)
        .bind(&p.name)
        .bind(&p.surname)
        .bind(optional(&p.gender))
        .bind(age)
        .bind(optional(&p.email))
        .bind(optional(&p.phone))
        .bind(optional(&p.race_role))
        .execute(pool)
        .await?;
        counts.participants += inserted.rows_affected();
    }

    for r in &folder.results {
        if r.date.trim().is_empty() || r.time.trim().is_empty() {
            counts.skipped += 1;
            continue;
        }

        // Historical exports carry no race number; every imported result
        // lands in race 1 of its recorded date.
        sqlx::query(
            "INSERT INTO results (event_id, date, race_id, participant_id, time)
             VALUES ($1, $2, 1, $3, $4)",
        )
        .bind(&event_id)
        .bind(&r.date)
        .bind(&r.id)
        .bind(&r.time)
        .execute(pool)
        .await?;
        counts.results += 1;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folders::{EventRow, ParticipantRow, ResultRow};
    use storage::Database;

    fn sample_folder() -> EventFolder {
        EventFolder {
            folder: "20250601_springrun".to_string(),
            event: EventRow {
                id: "evt-1".to_string(),
                name: "Spring Run".to_string(),
                date: "2025-06-01".to_string(),
                time: String::new(),
                place: "Kyiv".to_string(),
                is_race: "true".to_string(),
                age_limit: String::new(),
                max_child_age: String::new(),
                medical_required: "yes".to_string(),
                team_event: String::new(),
                gender_restriction: String::new(),
                description: String::new(),
            },
            participants: vec![
                ParticipantRow {
                    id: "p-1".to_string(),
                    name: "Anna".to_string(),
                    surname: "Koval".to_string(),
                    gender: "F".to_string(),
                    age: "24".to_string(),
                    email: "anna@example.com".to_string(),
                    phone: String::new(),
                    race_role: String::new(),
                },
                ParticipantRow {
                    id: "p-2".to_string(),
                    name: "No Age".to_string(),
                    surname: "Row".to_string(),
                    gender: String::new(),
                    age: String::new(),
                    email: String::new(),
                    phone: String::new(),
                    race_role: String::new(),
                },
            ],
            results: vec![ResultRow {
                id: "p-1".to_string(),
                date: "01062025".to_string(),
                time: "00:42:10".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_load_counts_and_skips() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.run_migrations().await.unwrap();

        let counts = load_event_folder(db.pool(), &sample_folder()).await.unwrap();

        assert_eq!(counts.events, 1);
        assert_eq!(counts.participants, 1);
        assert_eq!(counts.results, 1);
        assert_eq!(counts.skipped, 1);
    }

    #[tokio::test]
    async fn test_rerun_does_not_duplicate_events_or_participants() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.run_migrations().await.unwrap();

        load_event_folder(db.pool(), &sample_folder()).await.unwrap();
        let second = load_event_folder(db.pool(), &sample_folder()).await.unwrap();

        assert_eq!(second.events, 0);
        assert_eq!(second.participants, 0);

        let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(events, 1);
    }
}
