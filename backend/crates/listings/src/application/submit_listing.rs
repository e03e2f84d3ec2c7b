//! Submit Listing Use Case

use std::sync::Arc;

use chrono::Utc;
use platform::client::SourceAddress;

use crate::application::config::ListingsConfig;
use crate::domain::repository::{ListingRepository, SubmissionQuotaRepository};
use crate::domain::value_objects::{ListingDraft, ListingDraftInput};
use crate::error::{ListingError, ListingResult};

/// Output DTO for submit listing
#[derive(Debug, Clone)]
pub struct SubmitListingOutput {
    pub listing_id: i64,
}

/// Submit Listing Use Case
///
/// Validation runs before the quota counter is touched, so a rejected
/// payload never consumes quota. The quota check itself is the atomic
/// count-then-decide upsert.
pub struct SubmitListingUseCase<L, Q>
where
    L: ListingRepository,
    Q: SubmissionQuotaRepository,
{
    listing_repo: Arc<L>,
    quota_repo: Arc<Q>,
    config: Arc<ListingsConfig>,
}

impl<L, Q> SubmitListingUseCase<L, Q>
where
    L: ListingRepository,
    Q: SubmissionQuotaRepository,
{
    pub fn new(listing_repo: Arc<L>, quota_repo: Arc<Q>, config: Arc<ListingsConfig>) -> Self {
        Self {
            listing_repo,
            quota_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: ListingDraftInput,
        source: SourceAddress,
    ) -> ListingResult<SubmitListingOutput> {
        // Validate first; nothing is persisted for a bad payload
        let draft = ListingDraft::new(input)?;

        // Count this attempt against (source, today) atomically
        let today = Utc::now().date_naive();
        let used = self.quota_repo.register_submission(&source, today).await?;
        let decision = self.config.quota.decide(used);

        if !decision.allowed {
            tracing::warn!(
                source = %source,
                used = decision.used,
                "Submission refused, daily quota exhausted"
            );
            return Err(ListingError::QuotaExceeded);
        }

        let listing_id = self.listing_repo.create(&draft, &source).await?;

        tracing::info!(
            listing_id,
            source = %source,
            remaining = decision.remaining,
            "Listing submitted"
        );

        Ok(SubmitListingOutput { listing_id })
    }
}
