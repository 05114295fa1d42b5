use sqlx::SqlitePool;

use crate::dto::result::ResultItem;
use crate::error::{Result, StorageError};
use crate::models::RaceResult;

const RESULT_COLUMNS: &str = "id, event_id, date, race_id, participant_id, time";

/// Repository for race result database operations. Results are grouped into
/// races per event and occurrence date.
pub struct ResultRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a batch of results in one transaction. When `race_id` is not
    /// supplied, the batch lands in race `max(existing for event+date) + 1`;
    /// the number is computed inside the same transaction as the inserts, so
    /// the batch either records completely under one race or not at all.
    pub async fn record_batch(
        &self,
        event_id: &str,
        date: &str,
        race_id: Option<i64>,
        items: &[ResultItem],
    ) -> Result<Vec<RaceResult>> {
        let mut tx = self.pool.begin().await?;

        let race_id = match race_id {
            Some(race_id) => race_id,
            None => {
                let max: Option<i64> = sqlx::query_scalar(
                    "SELECT MAX(race_id) FROM results WHERE event_id = $1 AND date = $2",
                )
                .bind(event_id)
                .bind(date)
                .fetch_one(&mut *tx)
                .await?;

                max.unwrap_or(0) + 1
            }
        };

        let mut recorded = Vec::with_capacity(items.len());
        for item in items {
            let result = sqlx::query_as::<_, RaceResult>(&format!(
                "INSERT INTO results (event_id, date, race_id, participant_id, time)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {RESULT_COLUMNS}"
            ))
            .bind(event_id)
            .bind(date)
            .bind(race_id)
            .bind(&item.participant_id)
            .bind(&item.time)
            .fetch_one(&mut *tx)
            .await?;

            recorded.push(result);
        }

        tx.commit().await?;

        Ok(recorded)
    }

    /// List every result of an event, ordered by date, race and participant
    pub async fn list(&self, event_id: &str) -> Result<Vec<RaceResult>> {
        let results = sqlx::query_as::<_, RaceResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results
             WHERE event_id = $1
             ORDER BY date, race_id, participant_id"
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    /// Delete every result recorded for an event on one occurrence date.
    /// The whole day's races go as one group; single rows are never removed.
    pub async fn delete_group(&self, event_id: &str, date: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM results WHERE event_id = $1 AND date = $2")
            .bind(event_id)
            .bind(date)
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
    use crate::repository::testing::{race_event, test_db};

    fn items(entries: &[(&str, &str)]) -> Vec<ResultItem> {
        entries
            .iter()
            .map(|(participant_id, time)| ResultItem {
                participant_id: participant_id.to_string(),
                time: time.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_omitted_race_id_takes_next_number() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ResultRepository::new(db.pool());

        let first = repo
            .record_batch(&event.id, "01012025", None, &items(&[("p1", "00:42:10")]))
            .await
            .unwrap();
        assert_eq!(first[0].race_id, 1);

        let second = repo
            .record_batch(&event.id, "01012025", None, &items(&[("p2", "00:45:01")]))
            .await
            .unwrap();
        assert_eq!(second[0].race_id, 2);
    }

    #[tokio::test]
    async fn test_race_numbering_is_per_date() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ResultRepository::new(db.pool());

        repo.record_batch(&event.id, "01012025", Some(2), &items(&[("p1", "00:42:10")]))
            .await
            .unwrap();

        let other_day = repo
            .record_batch(&event.id, "02012025", None, &items(&[("p1", "00:44:00")]))
            .await
            .unwrap();
        assert_eq!(other_day[0].race_id, 1);

        let same_day = repo
            .record_batch(&event.id, "01012025", None, &items(&[("p2", "00:45:01")]))
            .await
            .unwrap();
        assert_eq!(same_day[0].race_id, 3);
    }

    #[tokio::test]
    async fn test_batch_lands_under_one_race() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ResultRepository::new(db.pool());

        let batch = items(&[("p1", "00:42:10"), ("p2", "00:43:22"), ("p3", "00:44:05")]);
        let recorded = repo
            .record_batch(&event.id, "01012025", None, &batch)
            .await
            .unwrap();

        assert_eq!(recorded.len(), 3);
        assert!(recorded.iter().all(|r| r.race_id == 1));

        let listed = repo.list(&event.id).await.unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_group_removes_only_that_date() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ResultRepository::new(db.pool());

        repo.record_batch(&event.id, "01012025", None, &items(&[("p1", "00:42:10")]))
            .await
            .unwrap();
        repo.record_batch(&event.id, "01012025", None, &items(&[("p2", "00:43:00")]))
            .await
            .unwrap();
        repo.record_batch(&event.id, "02012025", None, &items(&[("p3", "00:41:30")]))
            .await
            .unwrap();

        repo.delete_group(&event.id, "01012025").await.unwrap();

        let remaining = repo.list(&event.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].date, "02012025");
    }

    #[tokio::test]
    async fn test_delete_empty_group_is_not_found() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ResultRepository::new(db.pool());

        let err = repo.delete_group(&event.id, "01012025").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_listing_orders_by_date_race_participant() {
        let db = test_db().await;
        let event = EventRepository::new(db.pool())
            .create(&race_event("Spring Run", "2025-06-01"))
            .await
            .unwrap();
        let repo = ResultRepository::new(db.pool());

        repo.record_batch(&event.id, "02012025", Some(1), &items(&[("p9", "00:50:00")]))
            .await
            .unwrap();
        repo.record_batch(&event.id, "01012025", Some(2), &items(&[("p2", "00:45:00")]))
            .await
            .unwrap();
        repo.record_batch(&event.id, "01012025", Some(1), &items(&[("p3", "00:44:00"), ("p1", "00:43:00")]))
            .await
            .unwrap();

        let listed = repo.list(&event.id).await.unwrap();
        let order: Vec<(String, i64, String)> = listed
            .into_iter()
            .map(|r| (r.date, r.race_id, r.participant_id))
            .collect();

        assert_eq!(
            order,
            vec![
                ("01012025".to_string(), 1, "p1".to_string()),
                ("01012025".to_string(), 1, "p3".to_string()),
                ("01012025".to_string(), 2, "p2".to_string()),
                ("02012025".to_string(), 1, "p9".to_string()),
            ]
        );
    }
}
