//! API DTOs (Data Transfer Objects)
//!
//! Wire format is snake_case JSON; the public id field is `product_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Listing;
use crate::domain::value_objects::ListingDraftInput;

/// Request for POST /api/listings
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitListingRequest {
    pub product_name: String,
    pub product_condition: String,
    pub room_number: String,
    #[serde(default)]
    pub year_bought: Option<i32>,
    pub image_url: String,
    pub description: String,
    pub seller_name: String,
    pub seller_email: String,
    #[serde(default)]
    pub seller_phone: Option<String>,
}

impl From<SubmitListingRequest> for ListingDraftInput {
    fn from(req: SubmitListingRequest) -> Self {
        Self {
            product_name: req.product_name,
            product_condition: req.product_condition,
            room_number: req.room_number,
            year_bought: req.year_bought,
            image_url: req.image_url,
            description: req.description,
            seller_name: req.seller_name,
            seller_email: req.seller_email,
            seller_phone: req.seller_phone,
        }
    }
}

/// Response for POST /api/listings
#[derive(Debug, Clone, Serialize)]
pub struct SubmitListingResponse {
    pub success: bool,
    pub message: String,
    pub product_id: i64,
}

/// A single listing in list responses
#[derive(Debug, Clone, Serialize)]
pub struct ListingItem {
    pub product_id: i64,
    pub product_name: String,
    pub product_condition: String,
    pub room_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_bought: Option<i32>,
    pub image_url: String,
    pub description: String,
    pub seller_name: String,
    pub seller_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_phone: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Listing> for ListingItem {
    fn from(listing: Listing) -> Self {
        Self {
            product_id: listing.id,
            product_name: listing.product_name,
            product_condition: listing.product_condition,
            room_number: listing.room_number,
            year_bought: listing.year_bought,
            image_url: listing.image_url,
            description: listing.description,
            seller_name: listing.seller_name,
            seller_email: listing.seller_email,
            seller_phone: listing.seller_phone,
            status: listing.status.code().to_string(),
            created_at: listing.created_at,
        }
    }
}

/// Query parameters for GET /api/admin/listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Generic `{success, message}` response body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
