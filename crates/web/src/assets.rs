use std::path::{Path, PathBuf};

const LOGO_FILE: &str = "logo.png";

/// Filesystem store for per-event logo assets. Each event owns one
/// directory named after its derived key.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL of the event's logo, or `None` when no logo was uploaded.
    /// Absence is not an error.
    pub fn logo_url(&self, event_key: &str) -> Option<String> {
        if self.root.join(event_key).join(LOGO_FILE).is_file() {
            Some(format!("/assets/{}/{}", event_key, LOGO_FILE))
        } else {
            None
        }
    }

    /// Write or replace the event's logo image
    pub async fn save_logo(&self, event_key: &str, bytes: &[u8]) -> std::io::Result<()> {
        let dir = self.root.join(event_key);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(LOGO_FILE), bytes).await
    }

    /// Remove the event's asset directory, if it was ever provisioned
    pub async fn remove_event_assets(&self, event_key: &str) -> std::io::Result<()> {
        match tokio::fs::remove_dir_all(self.root.join(event_key)).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
