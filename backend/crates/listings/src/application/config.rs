//! Application Configuration
//!
//! Configuration for the listings application layer.

pub use platform::rate_limit::DailyQuota;

/// Listings application configuration
#[derive(Debug, Clone)]
pub struct ListingsConfig {
    /// Per-source daily submission quota
    pub quota: DailyQuota,
    /// How long old quota counter rows are retained before startup cleanup
    pub quota_retention_days: u32,
    /// Honor X-Forwarded-For when resolving the quota key. Only safe
    /// behind a reverse proxy that strips client-supplied headers.
    pub trust_forwarded_headers: bool,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            quota: DailyQuota::default(),
            quota_retention_days: 30,
            trust_forwarded_headers: false,
        }
    }
}
