//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::NaiveDate;
use platform::client::SourceAddress;

use crate::domain::entities::Listing;
use crate::domain::value_objects::{ListingDraft, ListingStatus};
use crate::error::ListingResult;

/// Listing repository trait
#[trait_variant::make(ListingRepository: Send)]
pub trait LocalListingRepository {
    /// Persist a validated draft as a pending listing, returning the
    /// generated id
    async fn create(&self, draft: &ListingDraft, source: &SourceAddress) -> ListingResult<i64>;

    /// Fetch a listing by id
    async fn find_by_id(&self, id: i64) -> ListingResult<Option<Listing>>;

    /// Fetch all approved listings, newest first
    async fn list_approved(&self) -> ListingResult<Vec<Listing>>;

    /// Fetch all listings with the given status, newest first
    async fn list_by_status(&self, status: ListingStatus) -> ListingResult<Vec<Listing>>;

    /// Set a listing's status
    ///
    /// Returns false when no listing with the id exists.
    async fn update_status(&self, id: i64, status: ListingStatus) -> ListingResult<bool>;

    /// Physically remove a listing
    ///
    /// Returns false when no listing with the id exists.
    async fn delete(&self, id: i64) -> ListingResult<bool>;
}

/// Submission quota repository trait
#[trait_variant::make(SubmissionQuotaRepository: Send)]
pub trait LocalSubmissionQuotaRepository {
    /// Atomically count a submission against (source, date)
    ///
    /// Returns the counter value AFTER this attempt was counted. The
    /// caller decides whether that value is within quota; refused
    /// attempts still advance the counter, which is harmless since every
    /// value past the ceiling is equally over quota.
    async fn register_submission(
        &self,
        source: &SourceAddress,
        date: NaiveDate,
    ) -> ListingResult<u32>;
}
