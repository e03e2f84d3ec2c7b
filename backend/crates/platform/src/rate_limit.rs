//! Rate Limiting Policies
//!
//! Counter-based policies shared by the request quota and login lockout
//! machinery. Storage lives with the feature crates; these types only
//! decide what a counter value means.

use std::time::Duration;

/// Per-source daily submission quota
#[derive(Debug, Clone)]
pub struct DailyQuota {
    /// Maximum submissions allowed per calendar day
    pub max_per_day: u32,
}

impl Default for DailyQuota {
    fn default() -> Self {
        Self { max_per_day: 10 }
    }
}

impl DailyQuota {
    pub fn new(max_per_day: u32) -> Self {
        Self { max_per_day }
    }

    /// Interpret a post-increment counter value
    ///
    /// `used` is the counter AFTER the current attempt was counted, so the
    /// attempt is allowed while `used <= max_per_day`.
    pub fn decide(&self, used: u32) -> QuotaDecision {
        QuotaDecision {
            allowed: used <= self.max_per_day,
            used,
            remaining: self.max_per_day.saturating_sub(used),
        }
    }
}

/// Quota check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaDecision {
    pub allowed: bool,
    pub used: u32,
    pub remaining: u32,
}

/// Failed login lockout policy
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    /// Consecutive failures before the source is locked out
    pub max_failures: u16,
    /// How long the lockout lasts once triggered
    pub lockout: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failures: 5,
            lockout: Duration::from_secs(15 * 60),
        }
    }
}

impl LockoutPolicy {
    pub fn new(max_failures: u16, lockout_secs: u64) -> Self {
        Self {
            max_failures,
            lockout: Duration::from_secs(lockout_secs),
        }
    }

    /// Whether a failure count has reached the lockout threshold
    pub fn triggers_lockout(&self, failed_count: u16) -> bool {
        failed_count >= self.max_failures
    }

    pub fn lockout_minutes(&self) -> i64 {
        self.lockout.as_secs() as i64 / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_allows_up_to_limit() {
        let quota = DailyQuota::default();
        for used in 1..=10 {
            let decision = quota.decide(used);
            assert!(decision.allowed, "submission {used} should be allowed");
        }
    }

    #[test]
    fn test_quota_refuses_past_limit() {
        let quota = DailyQuota::default();
        let decision = quota.decide(11);
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn test_quota_remaining_counts_down() {
        let quota = DailyQuota::new(3);
        assert_eq!(quota.decide(1).remaining, 2);
        assert_eq!(quota.decide(2).remaining, 1);
        assert_eq!(quota.decide(3).remaining, 0);
    }

    #[test]
    fn test_lockout_threshold() {
        let policy = LockoutPolicy::default();
        assert!(!policy.triggers_lockout(4));
        assert!(policy.triggers_lockout(5));
        assert!(policy.triggers_lockout(6));
    }

    #[test]
    fn test_lockout_duration() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.lockout_minutes(), 15);
    }
}
