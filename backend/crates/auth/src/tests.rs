//! Crate-level integration-style tests
//!
//! Unit tests for individual types live next to the types themselves;
//! these tests exercise behavior that crosses module boundaries.

mod config_tests {
    use crate::application::config::{AuthConfig, DEFAULT_SESSION_TTL};

    #[test]
    fn test_default_lockout_policy() {
        let config = AuthConfig::with_random_secret();
        assert_eq!(config.lockout.max_failures, 5);
        assert_eq!(config.lockout.lockout_minutes(), 15);
    }

    #[test]
    fn test_session_ttl_ms_matches_duration() {
        let config = AuthConfig::with_random_secret();
        assert_eq!(
            config.session_ttl_ms(),
            DEFAULT_SESSION_TTL.as_millis() as i64
        );
    }

    #[test]
    fn test_cookie_settings() {
        let config = AuthConfig::with_random_secret();
        let cookie = config.cookie();

        assert_eq!(cookie.name, "admin_session");
        assert!(cookie.http_only);
        assert_eq!(
            cookie.max_age_secs,
            Some(DEFAULT_SESSION_TTL.as_secs() as i64)
        );
    }
}

mod token_tests {
    use crate::application::config::AuthConfig;
    use crate::application::token::{create_session_token, verify_session_token};
    use uuid::Uuid;

    #[test]
    fn test_token_round_trip_with_config_secret() {
        let config = AuthConfig::with_random_secret();
        let session_id = Uuid::new_v4();

        let token = create_session_token(&session_id, &config.session_secret);
        assert_eq!(
            verify_session_token(&token, &config.session_secret),
            Some(session_id)
        );
    }

    #[test]
    fn test_token_rejected_across_secrets() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();

        let token = create_session_token(&Uuid::new_v4(), &a.session_secret);
        assert_eq!(verify_session_token(&token, &b.session_secret), None);
    }
}

mod dto_tests {
    use crate::presentation::dto::{LoginRequest, LoginResponse, SessionStatusResponse};

    #[test]
    fn test_login_request_deserializes_snake_case() {
        let json = r#"{"username": "storeadmin", "password": "correct horse battery"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.username, "storeadmin");
        assert_eq!(req.password, "correct horse battery");
    }

    #[test]
    fn test_login_response_serialization() {
        let resp = LoginResponse {
            success: true,
            message: "Login successful".to_string(),
        };

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains("Login successful"));
    }

    #[test]
    fn test_anonymous_status_omits_optional_fields() {
        let json = serde_json::to_string(&SessionStatusResponse::anonymous()).unwrap();

        assert!(json.contains(r#""authenticated":false"#));
        assert!(!json.contains("username"));
        assert!(!json.contains("expires_at_ms"));
    }

    #[test]
    fn test_authenticated_status_includes_fields() {
        let resp = SessionStatusResponse {
            authenticated: true,
            username: Some("storeadmin".to_string()),
            expires_at_ms: Some(1_700_000_000_000),
        };

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""authenticated":true"#));
        assert!(json.contains("storeadmin"));
        assert!(json.contains("1700000000000"));
    }
}

mod error_tests {
    use crate::error::AuthError;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::LockedOut.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::SessionFingerprintMismatch.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::MissingHeader("User-Agent".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("oops".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_credential_error_reveals_nothing() {
        // Unknown username and wrong password must share one message
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_lockout_message() {
        assert_eq!(
            AuthError::LockedOut.to_string(),
            "Too many failed login attempts, try again later"
        );
    }
}

mod lockout_flow_tests {
    use crate::domain::entity::login_attempts::LoginAttempts;
    use platform::client::SourceAddress;
    use platform::rate_limit::LockoutPolicy;

    #[test]
    fn test_sixth_attempt_refused_while_locked() {
        let policy = LockoutPolicy::default();
        let mut attempts = LoginAttempts::new(SourceAddress::from_db("198.51.100.9"));

        for _ in 0..5 {
            assert!(!attempts.is_locked());
            attempts.record_failure(&policy);
        }

        // The sixth attempt finds the source locked
        assert!(attempts.is_locked());
    }

    #[test]
    fn test_counters_are_per_source() {
        let policy = LockoutPolicy::default();
        let mut locked = LoginAttempts::new(SourceAddress::from_db("198.51.100.9"));
        let other = LoginAttempts::new(SourceAddress::from_db("198.51.100.10"));

        for _ in 0..5 {
            locked.record_failure(&policy);
        }

        assert!(locked.is_locked());
        assert!(!other.is_locked());
    }
}
