//! Browse Listings Use Case

use std::sync::Arc;

use crate::domain::entities::Listing;
use crate::domain::repository::ListingRepository;
use crate::domain::value_objects::ListingStatus;
use crate::error::ListingResult;

/// Browse Listings Use Case
pub struct BrowseListingsUseCase<L>
where
    L: ListingRepository,
{
    listing_repo: Arc<L>,
}

impl<L> BrowseListingsUseCase<L>
where
    L: ListingRepository,
{
    pub fn new(listing_repo: Arc<L>) -> Self {
        Self { listing_repo }
    }

    /// Public view: approved listings only, newest first
    pub async fn public_listings(&self) -> ListingResult<Vec<Listing>> {
        self.listing_repo.list_approved().await
    }

    /// Moderation view: listings with the given status, newest first
    ///
    /// Defaults to the pending queue when no filter is given.
    pub async fn moderation_queue(
        &self,
        status: Option<ListingStatus>,
    ) -> ListingResult<Vec<Listing>> {
        self.listing_repo
            .list_by_status(status.unwrap_or(ListingStatus::Pending))
            .await
    }
}
