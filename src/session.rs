//! Persisted session identity
//!
//! The backend hands out a token and a minimal user record at login; both
//! are kept as a JSON blob in a fixed file under the data directory, the
//! desktop analog of browser local storage. Nothing is validated or
//! refreshed locally: the blob is trusted as given until logout clears it.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Fixed storage key for the session blob.
pub const SESSION_FILE: &str = "session.json";

/// Minimal authenticated-user record kept client-side after login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: String,
}

/// What actually lands on disk: identity plus the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: SessionUser,
    pub token: String,
}

/// File-backed session storage.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    /// Load the persisted session, if any. A corrupt blob is removed and
    /// treated as "not logged in" rather than surfaced as an error.
    pub fn load(&self) -> Option<PersistedSession> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Discarding corrupt session blob: {}", e);
                let _ = std::fs::remove_file(&self.path);
                None
            }
        }
    }

    pub fn save(&self, session: &PersistedSession) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        tracing::debug!("Session persisted for {}", session.user.user_id);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
