//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::client::SourceAddress;
use platform::rate_limit::LockoutPolicy;
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::AdminId;

use crate::domain::entity::{
    admin::Admin, admin_session::AdminSession, login_attempts::LoginAttempts,
};
use crate::domain::repository::{AdminRepository, AdminSessionRepository, LoginAttemptRepository};
use crate::domain::value_object::{admin_name::AdminName, admin_password::AdminPassword};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete sessions whose expiry timestamp has passed
    pub async fn delete_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM admin_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired admin sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Admin Repository Implementation
// ============================================================================

impl AdminRepository for PgAuthRepository {
    async fn create(&self, admin: &Admin) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (
                admin_id,
                username,
                password_hash,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.username.as_str())
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.last_login_at)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_username(&self, username: &AdminName) -> AuthResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                admin_id,
                username,
                password_hash,
                last_login_at,
                created_at,
                updated_at
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                admin_id,
                username,
                password_hash,
                last_login_at,
                created_at,
                updated_at
            FROM admins
            WHERE admin_id = $1
            "#,
        )
        .bind(admin_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn any_exists(&self) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM admins)")
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn update(&self, admin: &Admin) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE admins SET
                password_hash = $2,
                last_login_at = $3,
                updated_at = $4
            WHERE admin_id = $1
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.last_login_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Login Attempt Repository Implementation
// ============================================================================

impl LoginAttemptRepository for PgAuthRepository {
    async fn find(&self, source: &SourceAddress) -> AuthResult<Option<LoginAttempts>> {
        let row = sqlx::query_as::<_, LoginAttemptRow>(
            r#"
            SELECT
                source_ip,
                failed_count,
                last_failed_at,
                locked_until
            FROM login_attempts
            WHERE source_ip = $1
            "#,
        )
        .bind(source.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_attempts()))
    }

    async fn record_failure(
        &self,
        source: &SourceAddress,
        policy: &LockoutPolicy,
    ) -> AuthResult<LoginAttempts> {
        // Increment and lock in one statement so concurrent failures
        // cannot each observe a pre-threshold count.
        let row = sqlx::query_as::<_, LoginAttemptRow>(
            r#"
            INSERT INTO login_attempts (source_ip, failed_count, last_failed_at, locked_until)
            VALUES (
                $1, 1, NOW(),
                CASE WHEN 1 >= $2 THEN NOW() + make_interval(mins => $3) ELSE NULL END
            )
            ON CONFLICT (source_ip) DO UPDATE SET
                failed_count = login_attempts.failed_count + 1,
                last_failed_at = NOW(),
                locked_until = CASE
                    WHEN login_attempts.failed_count + 1 >= $2
                    THEN NOW() + make_interval(mins => $3)
                    ELSE login_attempts.locked_until
                END
            RETURNING source_ip, failed_count, last_failed_at, locked_until
            "#,
        )
        .bind(source.as_str())
        .bind(policy.max_failures as i16)
        .bind(policy.lockout_minutes() as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_attempts())
    }

    async fn reset(&self, source: &SourceAddress) -> AuthResult<()> {
        sqlx::query("DELETE FROM login_attempts WHERE source_ip = $1")
            .bind(source.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Admin Session Repository Implementation
// ============================================================================

impl AdminSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AdminSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_sessions (
                session_id,
                admin_id,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.session_id)
        .bind(session.admin_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AdminSession>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, AdminSessionRow>(
            r#"
            SELECT
                session_id,
                admin_id,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM admin_sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                // Verify fingerprint
                if r.client_fingerprint_hash != fingerprint_hash {
                    tracing::warn!(
                        session_id = %session_id,
                        "Admin session fingerprint mismatch"
                    );
                    return Err(AuthError::SessionFingerprintMismatch);
                }
                Ok(Some(r.into_session()))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AdminSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE admin_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_admin(&self, admin_id: &AdminId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM admin_sessions WHERE admin_id = $1")
            .bind(admin_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.delete_expired_sessions().await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: Uuid,
    username: String,
    password_hash: String,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self) -> AuthResult<Admin> {
        let password_hash = AdminPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Admin {
            admin_id: AdminId::from_uuid(self.admin_id),
            username: AdminName::from_db(self.username),
            password_hash,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LoginAttemptRow {
    source_ip: String,
    failed_count: i16,
    last_failed_at: Option<DateTime<Utc>>,
    locked_until: Option<DateTime<Utc>>,
}

impl LoginAttemptRow {
    fn into_attempts(self) -> LoginAttempts {
        LoginAttempts {
            source_ip: SourceAddress::from_db(self.source_ip),
            failed_count: self.failed_count as u16,
            last_failed_at: self.last_failed_at,
            locked_until: self.locked_until,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AdminSessionRow {
    session_id: Uuid,
    admin_id: Uuid,
    expires_at_ms: i64,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AdminSessionRow {
    fn into_session(self) -> AdminSession {
        AdminSession {
            session_id: self.session_id,
            admin_id: AdminId::from_uuid(self.admin_id),
            expires_at_ms: self.expires_at_ms,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
