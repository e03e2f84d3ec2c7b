//! Admin Bootstrap Use Case
//!
//! Ensures the configured admin account exists at startup. There is no
//! self-service registration; the only way an admin account comes into
//! being is through this path.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    admin_name::AdminName,
    admin_password::{AdminPassword, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Bootstrap use case
pub struct EnsureAdminUseCase<A>
where
    A: AdminRepository,
{
    admin_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> EnsureAdminUseCase<A>
where
    A: AdminRepository,
{
    pub fn new(admin_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self { admin_repo, config }
    }

    /// Create the admin account if it does not already exist.
    ///
    /// Idempotent: returns `false` when the account is already present,
    /// leaving its stored credentials untouched.
    pub async fn execute(&self, username: &str, password: &str) -> AuthResult<bool> {
        let username = AdminName::new(username)
            .map_err(|e| AuthError::Internal(format!("Invalid admin username: {e}")))?;

        if self.admin_repo.find_by_username(&username).await?.is_some() {
            tracing::debug!(username = %username, "Admin account already present");
            return Ok(false);
        }

        let raw_password = RawPassword::new(password.to_string())
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;

        let password_hash = AdminPassword::from_raw(&raw_password, self.config.pepper())?;

        let admin = Admin::new(username, password_hash);
        self.admin_repo.create(&admin).await?;

        tracing::info!(username = %admin.username, "Admin account created");
        Ok(true)
    }
}
