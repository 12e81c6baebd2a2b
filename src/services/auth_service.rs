//! Auth Service
//!
//! Login, registration and logout against the backend, mirrored into the
//! in-memory session slot and the persisted session blob.

use crate::api::types::{CreateUserRequest, LoginRequest};
use crate::error::Result;
use crate::session::{PersistedSession, SessionUser};
use crate::state::AppState;
use tracing::{info, warn};

/// Auth service for session lifecycle
pub struct AuthService;

impl AuthService {
    /// Authenticate and persist the returned identity + token.
    pub async fn login(state: &AppState, credentials: LoginRequest) -> Result<SessionUser> {
        info!("Login attempt for {}", credentials.email);

        let resp = state.api.login(&credentials).await?;

        let user = SessionUser {
            user_id: resp.user.user_id,
            name: resp.user.name,
            email: resp.user.email,
            user_type: resp.user.user_type,
        };

        state.store.save(&PersistedSession {
            user: user.clone(),
            token: resp.token,
        })?;
        state.set_session(Some(user.clone()));

        info!("User {} logged in", user.user_id);
        Ok(user)
    }

    /// Register a new account, then log it in with the same credentials
    /// so the caller lands authenticated.
    pub async fn register(state: &AppState, req: CreateUserRequest) -> Result<SessionUser> {
        info!("Registering account for {}", req.email);

        let credentials = LoginRequest {
            email: req.email.clone(),
            password: req.password.clone(),
        };
        state.api.register(&req).await?;

        Self::login(state, credentials).await
    }

    /// End the session. Best-effort on the remote side: a failed
    /// `POST /users/logout` is logged and swallowed, and local state is
    /// cleared regardless, so the user is never stuck logged in locally.
    pub async fn logout(state: &AppState) -> Result<()> {
        if let Err(e) = state.api.logout().await {
            warn!("Remote logout failed, clearing local session anyway: {}", e);
        }

        state.set_session(None);
        state.store.clear()?;

        info!("Session cleared");
        Ok(())
    }
}
