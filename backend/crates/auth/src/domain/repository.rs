//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::AdminId;
use platform::client::SourceAddress;
use platform::rate_limit::LockoutPolicy;
use uuid::Uuid;

use crate::domain::entity::{
    admin::Admin, admin_session::AdminSession, login_attempts::LoginAttempts,
};
use crate::domain::value_object::admin_name::AdminName;
use crate::error::AuthResult;

/// Admin account repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Create a new admin account
    async fn create(&self, admin: &Admin) -> AuthResult<()>;

    /// Find admin by username
    async fn find_by_username(&self, username: &AdminName) -> AuthResult<Option<Admin>>;

    /// Find admin by ID
    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<Admin>>;

    /// Check if any admin account exists
    async fn any_exists(&self) -> AuthResult<bool>;

    /// Update admin (last login, password)
    async fn update(&self, admin: &Admin) -> AuthResult<()>;
}

/// Login attempt repository trait
#[trait_variant::make(LoginAttemptRepository: Send)]
pub trait LocalLoginAttemptRepository {
    /// Find the failure counter for a source address
    async fn find(&self, source: &SourceAddress) -> AuthResult<Option<LoginAttempts>>;

    /// Atomically record a failed attempt
    ///
    /// A single conditional upsert increments the counter and sets
    /// `locked_until` in the same statement when the count reaches the
    /// policy threshold. Returns the post-increment state.
    async fn record_failure(
        &self,
        source: &SourceAddress,
        policy: &LockoutPolicy,
    ) -> AuthResult<LoginAttempts>;

    /// Reset the counter after a successful login
    async fn reset(&self, source: &SourceAddress) -> AuthResult<()>;
}

/// Admin session repository trait
#[trait_variant::make(AdminSessionRepository: Send)]
pub trait LocalAdminSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AdminSession) -> AuthResult<()>;

    /// Find session by ID and verify fingerprint
    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AdminSession>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &AdminSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Delete all sessions for an admin
    async fn delete_all_for_admin(&self, admin_id: &AdminId) -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
