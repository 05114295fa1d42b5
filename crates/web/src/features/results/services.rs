use storage::dto::result::{RecordResultsRequest, ResultResponse, is_valid_occurrence_date};
use storage::repository::result::ResultRepository;

use crate::AppState;
use crate::error::{WebError, WebResult};
use crate::features::events::services::resolve_event;

/// Record a batch of results for a race event. An omitted occurrence date
/// means today; an omitted race number means the next free one for that day.
pub async fn record_results(
    state: &AppState,
    id_or_key: &str,
    req: &RecordResultsRequest,
) -> WebResult<Vec<ResultResponse>> {
    let event = resolve_event(state, id_or_key).await?;

    if !event.is_race {
        return Err(WebError::BadRequest(format!(
            "Event '{}' is not a race",
            event.name
        )));
    }

    if let Some(date) = req.date.as_deref() {
        if !is_valid_occurrence_date(date) {
            return Err(WebError::BadRequest(
                "date must be eight digits, DDMMYYYY".to_string(),
            ));
        }
    }

    if let Some(race_id) = req.race_id {
        if race_id < 1 {
            return Err(WebError::BadRequest(
                "raceId must be a positive number".to_string(),
            ));
        }
    }

    let date = req.date.clone().unwrap_or_else(today_occurrence_date);

    let recorded = ResultRepository::new(state.db.pool())
        .record_batch(&event.id, &date, req.race_id, &req.items)
        .await?;

    Ok(recorded
        .into_iter()
        .map(|r| ResultResponse::from_result(r, &event.folder))
        .collect())
}

/// List every result recorded for an event
pub async fn list_results(state: &AppState, id_or_key: &str) -> WebResult<Vec<ResultResponse>> {
    let event = resolve_event(state, id_or_key).await?;

    let results = ResultRepository::new(state.db.pool())
        .list(&event.id)
        .await?;

    Ok(results
        .into_iter()
        .map(|r| ResultResponse::from_result(r, &event.folder))
        .collect())
}

/// Delete the whole results group of one occurrence date
pub async fn delete_results_group(
    state: &AppState,
    id_or_key: &str,
    date: &str,
) -> WebResult<()> {
    let event = resolve_event(state, id_or_key).await?;

    ResultRepository::new(state.db.pool())
        .delete_group(&event.id, date)
        .await?;

    Ok(())
}

fn today_occurrence_date() -> String {
    chrono::Local::now().format("%d%m%Y").to_string()
}
