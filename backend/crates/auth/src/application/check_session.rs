//! Check Session Use Case
//!
//! Verifies and retrieves session information.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::admin_session::AdminSession;
use crate::domain::repository::{AdminRepository, AdminSessionRepository};
use crate::error::{AuthError, AuthResult};

/// Session info output
pub struct SessionInfoOutput {
    pub username: String,
    pub expires_at_ms: i64,
}

/// Check session use case
pub struct CheckSessionUseCase<A, S>
where
    A: AdminRepository,
    S: AdminSessionRepository + Clone + Send + Sync + 'static,
{
    admin_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> CheckSessionUseCase<A, S>
where
    A: AdminRepository,
    S: AdminSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(admin_repo: Arc<A>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            admin_repo,
            session_repo,
            config,
        }
    }

    /// Check if session is valid and return session info
    pub async fn execute(
        &self,
        session_token: &str,
        fingerprint_hash: &[u8],
    ) -> AuthResult<SessionInfoOutput> {
        let session = self.get_session(session_token, fingerprint_hash).await?;

        let admin = self
            .admin_repo
            .find_by_id(&session.admin_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        Ok(SessionInfoOutput {
            username: admin.username.to_string(),
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Just check if session is valid (returns bool)
    pub async fn is_valid(&self, session_token: &str, fingerprint_hash: &[u8]) -> bool {
        self.get_session(session_token, fingerprint_hash)
            .await
            .is_ok()
    }

    /// Get session and update last activity
    pub async fn get_session(
        &self,
        session_token: &str,
        fingerprint_hash: &[u8],
    ) -> AuthResult<AdminSession> {
        let session_id = token::verify_session_token(session_token, &self.config.session_secret)
            .ok_or(AuthError::SessionInvalid)?;

        let session = self
            .session_repo
            .find_by_id(session_id, fingerprint_hash)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        // Update last activity (fire and forget)
        let mut session = session;
        session.touch();

        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
