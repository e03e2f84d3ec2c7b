//! Admin Password Value Object
//!
//! Domain value object for admin passwords with NIST SP 800-63B compliance.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Security Features
//! - Argon2id hashing (memory-hard)
//! - Automatic memory zeroization
//! - Constant-time comparison
//! - Unicode NFKC normalization

use std::fmt;

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from login or bootstrap input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// ## Validation Rules (NIST SP 800-63B)
    /// - Minimum 8 characters
    /// - Maximum 128 characters
    /// - No control characters
    /// - No common patterns (sequential, keyboard, dictionary)
    /// - Unicode NFKC normalized
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }

            PasswordPolicyError::CommonPattern => {
                AppError::bad_request("Password is too common or follows a predictable pattern")
                    .with_action("Please choose a more unique password")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Accept input without policy checks
    ///
    /// Login must verify whatever the user typed, even when the stored
    /// credential predates the current policy.
    pub fn new_unchecked(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Admin Password (Hashed, for storage)
// ============================================================================

/// Hashed admin password for database storage
///
/// Stores password in Argon2id PHC string format.
/// Safe to store in database and logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPassword(HashedPassword);

impl AdminPassword {
    /// Create from raw password by hashing
    ///
    /// ## Arguments
    /// * `raw` - The validated raw password
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// Uses constant-time comparison to prevent timing attacks.
    ///
    /// ## Arguments
    /// * `raw` - The raw password to verify
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("ValidPass123!".to_string()).is_ok());
        assert!(RawPassword::new("short".to_string()).is_err());
        assert!(RawPassword::new("password123".to_string()).is_err());
    }

    #[test]
    fn test_unchecked_accepts_anything() {
        // Login path: no policy enforcement on verification input
        let raw = RawPassword::new_unchecked("x".to_string());
        assert!(format!("{:?}", raw).contains("REDACTED"));
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let raw = RawPassword::new("CorrectHorse#42".to_string()).unwrap();
        let hashed = AdminPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new_unchecked("WrongHorse#42".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_pepper_must_match() {
        let raw = RawPassword::new("CorrectHorse#42".to_string()).unwrap();
        let hashed = AdminPassword::from_raw(&raw, Some(b"pepper-a")).unwrap();

        assert!(hashed.verify(&raw, Some(b"pepper-a")));
        assert!(!hashed.verify(&raw, Some(b"pepper-b")));
        assert!(!hashed.verify(&raw, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("CorrectHorse#42".to_string()).unwrap();
        let hashed = AdminPassword::from_raw(&raw, None).unwrap();

        let restored = AdminPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_invalid_phc_string_rejected() {
        assert!(AdminPassword::from_phc_string("not-a-hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("CorrectHorse#42".to_string()).unwrap();
        let hashed = AdminPassword::from_raw(&raw, None).unwrap();

        assert!(!format!("{:?}", hashed).contains("argon2"));
        assert_eq!(hashed.to_string(), "[HASHED_PASSWORD]");
    }
}
