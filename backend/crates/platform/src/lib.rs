//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (source address, User-Agent fingerprint)
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management
//! - Submission quota and login lockout policies

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
