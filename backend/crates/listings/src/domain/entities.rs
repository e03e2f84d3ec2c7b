//! Domain Entities
//!
//! Core business entities for the listings domain.

use chrono::{DateTime, Utc};
use platform::client::SourceAddress;

use crate::domain::value_objects::{ListingDraft, ListingStatus};

/// Listing entity - a marketplace item moving through moderation
#[derive(Debug, Clone)]
pub struct Listing {
    /// Sequential public id, assigned by the database
    pub id: i64,
    pub product_name: String,
    pub product_condition: String,
    pub room_number: String,
    pub year_bought: Option<i32>,
    pub image_url: String,
    pub description: String,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_phone: Option<String>,
    pub status: ListingStatus,
    /// Source address of the submitter, counted against the daily quota
    pub source_ip: SourceAddress,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Rehydrate a listing from stored fields
    pub fn from_parts(
        id: i64,
        draft: ListingDraft,
        status: ListingStatus,
        source_ip: SourceAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_name: draft.product_name,
            product_condition: draft.product_condition,
            room_number: draft.room_number,
            year_bought: draft.year_bought,
            image_url: draft.image_url,
            description: draft.description,
            seller_name: draft.seller_name,
            seller_email: draft.seller_email,
            seller_phone: draft.seller_phone,
            status,
            source_ip,
            created_at,
        }
    }

    /// Mark the listing approved (idempotent)
    pub fn approve(&mut self) {
        self.status = ListingStatus::Approved;
    }

    /// Mark the listing rejected (idempotent)
    ///
    /// Rejection is a status transition, not a delete; the row stays
    /// behind as an audit trail.
    pub fn reject(&mut self) {
        self.status = ListingStatus::Rejected;
    }

    /// Check whether the listing should appear on the public endpoint
    pub fn is_publicly_visible(&self) -> bool {
        self.status.is_public()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ListingDraftInput;

    fn sample_listing(status: ListingStatus) -> Listing {
        let draft = ListingDraft::new(ListingDraftInput {
            product_name: "Desk lamp".to_string(),
            product_condition: "Like new".to_string(),
            room_number: "101".to_string(),
            year_bought: None,
            image_url: "https://img.example.com/lamp.jpg".to_string(),
            description: "Warm white LED".to_string(),
            seller_name: "Sam Lee".to_string(),
            seller_email: "sam@example.com".to_string(),
            seller_phone: None,
        })
        .unwrap();

        Listing::from_parts(
            1,
            draft,
            status,
            SourceAddress::from_db("192.0.2.1"),
            Utc::now(),
        )
    }

    #[test]
    fn test_approve_transition() {
        let mut listing = sample_listing(ListingStatus::Pending);
        assert!(!listing.is_publicly_visible());

        listing.approve();
        assert_eq!(listing.status, ListingStatus::Approved);
        assert!(listing.is_publicly_visible());

        // Idempotent
        listing.approve();
        assert_eq!(listing.status, ListingStatus::Approved);
    }

    #[test]
    fn test_reject_transition() {
        let mut listing = sample_listing(ListingStatus::Pending);
        listing.reject();
        assert_eq!(listing.status, ListingStatus::Rejected);
        assert!(!listing.is_publicly_visible());

        // Idempotent
        listing.reject();
        assert_eq!(listing.status, ListingStatus::Rejected);
    }

    #[test]
    fn test_rejected_listing_hidden() {
        let listing = sample_listing(ListingStatus::Rejected);
        assert!(!listing.is_publicly_visible());
    }
}
