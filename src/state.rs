//! Application state management

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{SessionStore, SessionUser};
use parking_lot::RwLock;
use std::sync::Arc;

/// State shared across all commands: the configuration, the API client,
/// the session store and the in-memory session slot. The slot has a single
/// writer (login/logout through the auth service) and many readers.
pub struct AppState {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub store: SessionStore,
    session: RwLock<Option<SessionUser>>,
}

impl AppState {
    /// Build application state: create the data directory, construct the
    /// HTTP client and seed the session slot from the persisted blob.
    pub fn new(config: Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        tracing::debug!("Data directory: {:?}", config.data_dir);

        let api = Arc::new(ApiClient::new(config.api_base.clone()));
        let store = SessionStore::new(&config.data_dir);
        let session = RwLock::new(store.load().map(|s| s.user));

        Ok(Self {
            config,
            api,
            store,
            session,
        })
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub(crate) fn set_session(&self, user: Option<SessionUser>) {
        *self.session.write() = user;
    }
}
