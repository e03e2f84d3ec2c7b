//! Session Token Signing
//!
//! Session tokens have the form `<session_id>.<signature>` where the
//! signature is an HMAC-SHA256 over the session ID string, base64url
//! encoded without padding. The token itself carries no session data;
//! the signature only proves the ID was issued by this server.

use platform::crypto;
use uuid::Uuid;

/// Sign a session ID into a cookie-ready token
pub fn create_session_token(session_id: &Uuid, secret: &[u8; 32]) -> String {
    let id_string = session_id.to_string();
    let signature = crypto::hmac_sha256(secret, id_string.as_bytes());

    format!("{}.{}", id_string, crypto::to_base64_url(&signature))
}

/// Verify a token and extract the session ID.
///
/// Returns `None` for malformed tokens and for valid-looking tokens
/// whose signature does not match.
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> Option<Uuid> {
    let (id_string, signature_b64) = token.split_once('.')?;

    let provided = crypto::from_base64_url(signature_b64).ok()?;
    let expected = crypto::hmac_sha256(secret, id_string.as_bytes());

    if !crypto::constant_time_eq(&provided, &expected) {
        return None;
    }

    Uuid::parse_str(id_string).ok()
}
