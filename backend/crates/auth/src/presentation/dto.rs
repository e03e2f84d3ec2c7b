//! API DTOs (Data Transfer Objects)
//!
//! Wire format is snake_case JSON.

use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
///
/// Always 200; `authenticated: false` covers missing, invalid, and
/// expired sessions alike.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<i64>,
}

impl SessionStatusResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            username: None,
            expires_at_ms: None,
        }
    }
}
