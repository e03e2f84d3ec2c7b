//! Moderate Listing Use Case

use std::sync::Arc;

use crate::domain::repository::ListingRepository;
use crate::domain::value_objects::ListingStatus;
use crate::error::{ListingError, ListingResult};

/// Moderate Listing Use Case
///
/// Approve and reject are idempotent status transitions; delete is a
/// physical removal. All three require an authenticated admin session,
/// enforced by middleware ahead of the handler.
pub struct ModerateListingUseCase<L>
where
    L: ListingRepository,
{
    listing_repo: Arc<L>,
}

impl<L> ModerateListingUseCase<L>
where
    L: ListingRepository,
{
    pub fn new(listing_repo: Arc<L>) -> Self {
        Self { listing_repo }
    }

    /// Approve a listing, making it publicly visible
    pub async fn approve(&self, id: i64) -> ListingResult<()> {
        self.transition(id, ListingStatus::Approved).await
    }

    /// Reject a listing
    ///
    /// The row is retained with `rejected` status as an audit trail.
    pub async fn reject(&self, id: i64) -> ListingResult<()> {
        self.transition(id, ListingStatus::Rejected).await
    }

    /// Physically remove a listing
    pub async fn delete(&self, id: i64) -> ListingResult<()> {
        let removed = self.listing_repo.delete(id).await?;
        if !removed {
            return Err(ListingError::ListingNotFound);
        }

        tracing::info!(listing_id = id, "Listing deleted");
        Ok(())
    }

    async fn transition(&self, id: i64, status: ListingStatus) -> ListingResult<()> {
        let mut listing = self
            .listing_repo
            .find_by_id(id)
            .await?
            .ok_or(ListingError::ListingNotFound)?;

        match status {
            ListingStatus::Approved => listing.approve(),
            ListingStatus::Rejected => listing.reject(),
            ListingStatus::Pending => {}
        }

        self.listing_repo.update_status(id, listing.status).await?;

        tracing::info!(listing_id = id, status = %listing.status, "Listing moderated");
        Ok(())
    }
}
