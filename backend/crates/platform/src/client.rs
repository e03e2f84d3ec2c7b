//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.
//!
//! Two identities are derived per request:
//! - [`SourceAddress`] - the submitter's IP address, used as the key for
//!   the daily submission quota and the login lockout counter
//! - [`ClientFingerprint`] - a User-Agent hash used to bind admin
//!   sessions to a specific client

use axum::http::{HeaderMap, header};
use std::fmt;
use std::net::IpAddr;

use crate::crypto::sha256;

/// Source address of a request
///
/// Normalized string form of the client IP, stored as TEXT so both
/// IPv4 and IPv6 addresses fit without special casing. This is the
/// per-address key for quota and lockout counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceAddress(String);

impl SourceAddress {
    /// Create from a resolved IP address
    pub fn from_ip(ip: IpAddr) -> Self {
        Self(ip.to_string())
    }

    /// Create from a stored database value
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Resolve the source address for a request
    ///
    /// The counters keyed on this address are security controls, so the
    /// socket address is authoritative. X-Forwarded-For is honored only
    /// when `trust_forwarded` is set, for deployments behind a reverse
    /// proxy that strips client-supplied forwarding headers; a directly
    /// exposed server must not trust them, or every request could mint
    /// a fresh counter key.
    pub fn from_request(
        headers: &HeaderMap,
        direct_ip: Option<IpAddr>,
        trust_forwarded: bool,
    ) -> Option<Self> {
        if trust_forwarded {
            extract_client_ip(headers, direct_ip).map(Self::from_ip)
        } else {
            direct_ip.map(Self::from_ip)
        }
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client fingerprint derived from request headers
///
/// Used to bind admin sessions to specific clients and detect session
/// hijacking.
#[derive(Debug, Clone)]
pub struct ClientFingerprint {
    /// SHA-256 hash of the User-Agent header
    pub hash: [u8; 32],
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    /// Original User-Agent string (for logging/display)
    pub user_agent: Option<String>,
}

impl ClientFingerprint {
    /// Create a new fingerprint
    pub fn new(hash: [u8; 32], ip: Option<IpAddr>, user_agent: Option<String>) -> Self {
        Self {
            hash,
            ip,
            user_agent,
        }
    }

    /// Get hash as Vec<u8> (for database storage)
    pub fn hash_vec(&self) -> Vec<u8> {
        self.hash.to_vec()
    }

    /// Get IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Error when extracting client fingerprint
#[derive(Debug, Clone, thiserror::Error)]
pub enum FingerprintError {
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}

/// Extract client fingerprint from request headers
///
/// The fingerprint is a SHA-256 hash of the User-Agent header,
/// used to bind admin sessions to specific clients.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `client_ip` - Client IP address (from connection or X-Forwarded-For)
///
/// ## Returns
/// * `Ok(ClientFingerprint)` - Successfully extracted fingerprint
/// * `Err(FingerprintError)` - Missing User-Agent header
pub fn extract_fingerprint(
    headers: &HeaderMap,
    client_ip: Option<IpAddr>,
) -> Result<ClientFingerprint, FingerprintError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| FingerprintError::MissingHeader("User-Agent".to_string()))?;

    let hash = sha256(user_agent.as_bytes());

    Ok(ClientFingerprint::new(
        hash,
        client_ip,
        Some(user_agent.to_string()),
    ))
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
