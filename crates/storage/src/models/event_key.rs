use chrono::NaiveDate;

/// A newtype for the derived event key (the "folder" column), so only keys
/// produced by [`EventKey::derive`] ever reach the database.
///
/// The key doubles as the on-disk asset directory name for the event, which
/// is why it is restricted to alphanumeric characters and one underscore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKey(String);

impl EventKey {
    /// Derives the key from the event date and name: the date with its
    /// separators stripped (`YYYYMMDD`), an underscore, then the name
    /// lower-cased with everything non-alphanumeric removed.
    ///
    /// Deriving twice from the same inputs always yields the same key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use storage::models::EventKey;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let key = EventKey::derive(date, "Spring Run");
    /// assert_eq!(key.as_str(), "20250601_springrun");
    /// ```
    pub fn derive(date: NaiveDate, name: &str) -> Self {
        let date_part = date.format("%Y%m%d").to_string();

        let name_part: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        // An all-punctuation name still needs a usable key.
        let name_part = if name_part.is_empty() {
            "event".to_string()
        } else {
            name_part
        };

        Self(format!("{}_{}", date_part, name_part))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
