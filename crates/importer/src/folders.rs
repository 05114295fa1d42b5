use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

const PARTICIPANTS_FILE: &str = "participants.csv";
const RESULTS_FILE: &str = "results.csv";

/// One event folder read from disk: an event CSV with a single row, plus
/// optional participants and results files alongside it.
#[derive(Debug)]
pub struct EventFolder {
    pub folder: String,
    pub event: EventRow,
    pub participants: Vec<ParticipantRow>,
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
pub struct EventRow {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub place: String,
    #[serde(default, rename = "isRace")]
    pub is_race: String,
    #[serde(default, rename = "ageLimit")]
    pub age_limit: String,
    #[serde(default, rename = "maxChildAge")]
    pub max_child_age: String,
    #[serde(default, rename = "medicalRequired")]
    pub medical_required: String,
    #[serde(default, rename = "teamEvent")]
    pub team_event: String,
    #[serde(default, rename = "genderRestriction")]
    pub gender_restriction: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantRow {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, rename = "raceRole")]
    pub race_role: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultRow {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// Read one per-event folder. The event row lives in the first `.csv` that
/// is neither the participants nor the results file; folders without one
/// are skipped.
pub fn read_event_folder(path: &Path) -> Result<Option<EventFolder>> {
    let folder = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut event_file = None;
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".csv") && name != PARTICIPANTS_FILE && name != RESULTS_FILE {
            event_file = Some(entry.path());
            break;
        }
    }

    let Some(event_file) = event_file else {
        return Ok(None);
    };

    let mut event_rows: Vec<EventRow> = read_rows(&event_file)?;
    if event_rows.is_empty() {
        return Ok(None);
    }

    Ok(Some(EventFolder {
        folder,
        event: event_rows.remove(0),
        participants: read_rows(&path.join(PARTICIPANTS_FILE))?,
        results: read_rows(&path.join(RESULTS_FILE))?,
    }))
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .trim(Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }

    Ok(rows)
}

/// The CSV exports write booleans as "true"/"yes"
pub fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}

/// Empty CSV cells become NULL columns
pub fn optional(value: &str) -> Option<&str> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_csv_spellings() {
        assert!(parse_flag("true"));
        assert!(parse_flag("Yes"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_optional_blanks_to_none() {
        assert_eq!(optional("  "), None);
        assert_eq!(optional("Kyiv"), Some("Kyiv"));
    }
}
