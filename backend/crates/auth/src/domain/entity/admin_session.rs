//! Admin Session Entity
//!
//! Represents an authenticated admin session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use kernel::id::AdminId;
use uuid::Uuid;

/// Admin session entity
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to Admin
    pub admin_id: AdminId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Client fingerprint hash (User-Agent based)
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP (optional, for logging)
    pub client_ip: Option<String>,
    /// User agent string (for session management display)
    pub user_agent: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl AdminSession {
    /// Create a new admin session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        admin_id: AdminId,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            admin_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_not_expired() {
        let session = AdminSession::new(
            AdminId::new(),
            vec![0u8; 32],
            Some("192.0.2.1".to_string()),
            Some("test-agent".to_string()),
            Duration::hours(12),
        );

        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_expired_session() {
        let mut session = AdminSession::new(
            AdminId::new(),
            vec![0u8; 32],
            None,
            None,
            Duration::hours(12),
        );
        session.expires_at_ms = Utc::now().timestamp_millis() - 1000;

        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_touch_advances_activity() {
        let mut session = AdminSession::new(
            AdminId::new(),
            vec![0u8; 32],
            None,
            None,
            Duration::hours(12),
        );
        let before = session.last_activity_at;
        session.touch();
        assert!(session.last_activity_at >= before);
    }
}
