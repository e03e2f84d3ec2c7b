//! Login Attempts Entity
//!
//! Failed-login tracking per source address. The counter lives on the
//! address rather than the account so attempts against unknown usernames
//! are throttled the same way as attempts against real ones.

use chrono::{DateTime, Utc};
use platform::client::SourceAddress;
use platform::rate_limit::LockoutPolicy;

/// Failed login counter for one source address
#[derive(Debug, Clone)]
pub struct LoginAttempts {
    pub source_ip: SourceAddress,
    /// Consecutive failure count
    pub failed_count: u16,
    /// Last failure time
    pub last_failed_at: Option<DateTime<Utc>>,
    /// Locked out until (set when failures reach the threshold)
    pub locked_until: Option<DateTime<Utc>>,
}

impl LoginAttempts {
    /// Fresh counter for a source with no recorded failures
    pub fn new(source_ip: SourceAddress) -> Self {
        Self {
            source_ip,
            failed_count: 0,
            last_failed_at: None,
            locked_until: None,
        }
    }

    /// Check if the source is currently locked out
    pub fn is_locked(&self) -> bool {
        if let Some(locked_until) = self.locked_until {
            Utc::now() < locked_until
        } else {
            false
        }
    }

    /// Record a failed login attempt
    ///
    /// Mirrors the conditional upsert the repository runs; kept on the
    /// entity so the lockout state machine is testable without a
    /// database.
    pub fn record_failure(&mut self, policy: &LockoutPolicy) {
        let now = Utc::now();
        self.failed_count += 1;
        self.last_failed_at = Some(now);

        if policy.triggers_lockout(self.failed_count) {
            self.locked_until = Some(now + chrono::Duration::minutes(policy.lockout_minutes()));
        }
    }

    /// Reset the counter on successful login
    pub fn reset(&mut self) {
        self.failed_count = 0;
        self.last_failed_at = None;
        self.locked_until = None;
    }
}
