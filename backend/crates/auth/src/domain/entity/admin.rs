//! Admin Entity
//!
//! A moderator account. There is a single privilege level; anyone who can
//! log in can moderate.

use chrono::{DateTime, Utc};
use kernel::id::AdminId;

use crate::domain::value_object::{admin_name::AdminName, admin_password::AdminPassword};

/// Admin account entity
#[derive(Debug, Clone)]
pub struct Admin {
    pub admin_id: AdminId,
    pub username: AdminName,
    /// Argon2id hash, PHC string format
    pub password_hash: AdminPassword,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Create a new admin account
    pub fn new(username: AdminName, password_hash: AdminPassword) -> Self {
        let now = Utc::now();
        Self {
            admin_id: AdminId::new(),
            username,
            password_hash,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Replace the stored password hash
    pub fn update_password(&mut self, new_password: AdminPassword) {
        self.password_hash = new_password;
        self.updated_at = Utc::now();
    }
}
