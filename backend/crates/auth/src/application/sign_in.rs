//! Sign In Use Case
//!
//! Authenticates an admin and creates a session.

use std::sync::Arc;

use platform::client::SourceAddress;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::admin_session::AdminSession;
use crate::domain::repository::{AdminRepository, AdminSessionRepository, LoginAttemptRepository};
use crate::domain::value_object::{admin_name::AdminName, admin_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Admin username
    pub username: String,
    /// Password
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    /// Username of the signed-in admin
    pub username: String,
}

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign in use case
///
/// Failed attempts are counted per source address, including attempts
/// against unknown usernames, so probing for valid accounts locks the
/// source out just like wrong passwords do.
pub struct SignInUseCase<A, L, S>
where
    A: AdminRepository,
    L: LoginAttemptRepository,
    S: AdminSessionRepository,
{
    admin_repo: Arc<A>,
    attempt_repo: Arc<L>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, L, S> SignInUseCase<A, L, S>
where
    A: AdminRepository,
    L: LoginAttemptRepository,
    S: AdminSessionRepository,
{
    pub fn new(
        admin_repo: Arc<A>,
        attempt_repo: Arc<L>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            admin_repo,
            attempt_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        source: SourceAddress,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        // Check lockout before touching credentials
        if let Some(attempts) = self.attempt_repo.find(&source).await? {
            if attempts.is_locked() {
                tracing::warn!(source = %source, "Login refused, source is locked out");
                return Err(AuthError::LockedOut);
            }
        }

        // A username that fails validation cannot match any account
        let username = match AdminName::new(&input.username) {
            Ok(username) => username,
            Err(_) => return self.fail(&source).await,
        };

        let Some(mut admin) = self.admin_repo.find_by_username(&username).await? else {
            return self.fail(&source).await;
        };

        // Verify password
        let raw_password = RawPassword::new_unchecked(input.password);
        if !admin
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return self.fail(&source).await;
        }

        // Success clears the failure counter
        self.attempt_repo.reset(&source).await?;

        admin.record_login();
        self.admin_repo.update(&admin).await?;

        // Create session bound to the client fingerprint
        let session = AdminSession::new(
            admin.admin_id.clone(),
            fingerprint.hash_vec(),
            fingerprint.ip_string(),
            fingerprint.user_agent.clone(),
            chrono::Duration::milliseconds(self.config.session_ttl_ms()),
        );

        self.session_repo.create(&session).await?;

        let session_token =
            token::create_session_token(&session.session_id, &self.config.session_secret);

        tracing::info!(
            username = %admin.username,
            session_id = %session.session_id,
            "Admin signed in"
        );

        Ok(SignInOutput {
            session_token,
            username: admin.username.to_string(),
        })
    }

    /// Record a failed attempt and return the uniform credential error
    async fn fail(&self, source: &SourceAddress) -> AuthResult<SignInOutput> {
        let attempts = self
            .attempt_repo
            .record_failure(source, &self.config.lockout)
            .await?;

        if attempts.is_locked() {
            tracing::warn!(
                source = %source,
                failed_count = attempts.failed_count,
                lockout_minutes = self.config.lockout.lockout_minutes(),
                "Source locked out after repeated login failures"
            );
        } else {
            tracing::info!(
                source = %source,
                failed_count = attempts.failed_count,
                "Failed login attempt"
            );
        }

        Err(AuthError::InvalidCredentials)
    }
}
