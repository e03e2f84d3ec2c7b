//! Sign Out Use Case
//!
//! Invalidates an admin session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::repository::AdminSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AdminSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AdminSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out from the current session
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let session_id = token::verify_session_token(session_token, &self.config.session_secret)
            .ok_or(AuthError::SessionInvalid)?;

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "Admin signed out");
        Ok(())
    }
}
