//! Authentication Configuration

use std::time::Duration;

use platform::cookie::{CookieConfig, SameSite};
use platform::rate_limit::LockoutPolicy;
use rand::RngCore;

/// Default session lifetime (12 hours)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Name of the session cookie
    pub session_cookie_name: String,
    /// HMAC secret for session token signing
    pub session_secret: [u8; 32],
    /// Session lifetime
    pub session_ttl: Duration,
    /// Whether the session cookie requires HTTPS
    pub cookie_secure: bool,
    /// SameSite policy for the session cookie
    pub cookie_same_site: SameSite,
    /// Optional server-side pepper mixed into password hashing
    pub password_pepper: Option<Vec<u8>>,
    /// Failed-login lockout policy
    pub lockout: LockoutPolicy,
    /// Honor X-Forwarded-For when resolving the lockout key. Only safe
    /// behind a reverse proxy that strips client-supplied headers.
    pub trust_forwarded_headers: bool,
}

impl AuthConfig {
    /// Create a config with a freshly generated session secret.
    ///
    /// Sessions do not survive a restart with a random secret. Production
    /// deployments should load a persistent secret instead.
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);

        Self {
            session_cookie_name: "admin_session".to_string(),
            session_secret: secret,
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            lockout: LockoutPolicy::default(),
            trust_forwarded_headers: false,
        }
    }

    /// Development preset: no HTTPS requirement
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session lifetime in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Pepper as a byte slice, if configured
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie settings for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.is_some())
            .field("lockout", &self.lockout)
            .field("trust_forwarded_headers", &self.trust_forwarded_headers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::with_random_secret();
        assert_eq!(config.session_cookie_name, "admin_session");
        assert_eq!(config.session_ttl, DEFAULT_SESSION_TTL);
        assert!(config.cookie_secure);
        assert!(config.password_pepper.is_none());
        assert!(!config.trust_forwarded_headers);
    }

    #[test]
    fn test_development_disables_secure() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::with_random_secret();
        let out = format!("{:?}", config);
        assert!(out.contains("[REDACTED]"));
    }
}
