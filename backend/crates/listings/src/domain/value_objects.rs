//! Domain Value Objects
//!
//! Immutable value types for the listings domain.

use std::fmt;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ListingError, ListingResult};

// ============================================================================
// ListingStatus - Moderation status enum
// ============================================================================

/// Moderation status of a listing
///
/// Intentionally kept simple with only 3 states:
/// - **Pending**: Awaiting moderation, not publicly visible
/// - **Approved**: Cleared by an admin, publicly visible
/// - **Rejected**: Refused by an admin, kept for the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum ListingStatus {
    /// Newly submitted, awaiting moderation
    #[default]
    Pending = 0,

    /// Approved by an admin, visible on the public endpoint
    Approved = 1,

    /// Rejected by an admin, retained but never served publicly
    Rejected = 2,
}

impl ListingStatus {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Check if the listing should appear on the public endpoint
    #[inline]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// ListingDraft - Validated submission payload
// ============================================================================

/// Oldest plausible purchase year for a second-hand item
const MIN_YEAR_BOUGHT: i32 = 1900;

/// Raw submission fields, before validation
#[derive(Debug, Clone, Default)]
pub struct ListingDraftInput {
    pub product_name: String,
    pub product_condition: String,
    pub room_number: String,
    pub year_bought: Option<i32>,
    pub image_url: String,
    pub description: String,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_phone: Option<String>,
}

/// A fully validated listing submission
///
/// Construction is the only validation gate: every field of a
/// `ListingDraft` has already been trimmed and checked, so the
/// repository can persist it without further inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    pub product_name: String,
    pub product_condition: String,
    pub room_number: String,
    pub year_bought: Option<i32>,
    pub image_url: String,
    pub description: String,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_phone: Option<String>,
}

impl ListingDraft {
    /// Validate a raw submission into a draft
    ///
    /// Required fields must be non-blank after trimming. The seller email
    /// must pass basic format validation. When present, the phone number
    /// must be exactly 10 ASCII digits and the purchase year must fall in
    /// 1900..=current.
    pub fn new(input: ListingDraftInput) -> ListingResult<Self> {
        let product_name = required_field("product_name", &input.product_name)?;
        let product_condition = required_field("product_condition", &input.product_condition)?;
        let room_number = required_field("room_number", &input.room_number)?;
        let image_url = required_field("image_url", &input.image_url)?;
        let description = required_field("description", &input.description)?;
        let seller_name = required_field("seller_name", &input.seller_name)?;
        let seller_email = required_field("seller_email", &input.seller_email)?;

        if !is_valid_email(&seller_email) {
            return Err(ListingError::InvalidField {
                field: "seller_email".to_string(),
                reason: "invalid email format".to_string(),
            });
        }

        let seller_phone = match input.seller_phone {
            Some(raw) => {
                let phone = raw.trim().to_string();
                if phone.is_empty() {
                    None
                } else {
                    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
                        return Err(ListingError::InvalidField {
                            field: "seller_phone".to_string(),
                            reason: "must be exactly 10 digits".to_string(),
                        });
                    }
                    Some(phone)
                }
            }
            None => None,
        };

        if let Some(year) = input.year_bought {
            let current_year = Utc::now().year();
            if !(MIN_YEAR_BOUGHT..=current_year).contains(&year) {
                return Err(ListingError::InvalidField {
                    field: "year_bought".to_string(),
                    reason: format!("must be between {MIN_YEAR_BOUGHT} and {current_year}"),
                });
            }
        }

        Ok(Self {
            product_name,
            product_condition,
            room_number,
            year_bought: input.year_bought,
            image_url,
            description,
            seller_name,
            seller_email,
            seller_phone,
        })
    }
}

/// Trim a required field, rejecting blanks
fn required_field(name: &str, raw: &str) -> ListingResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ListingError::MissingField(name.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Basic email format validation
fn is_valid_email(email: &str) -> bool {
    // Must contain exactly one @
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    if domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ListingDraftInput {
        ListingDraftInput {
            product_name: "Mini fridge".to_string(),
            product_condition: "Good".to_string(),
            room_number: "214B".to_string(),
            year_bought: Some(2023),
            image_url: "https://img.example.com/fridge.jpg".to_string(),
            description: "Barely used, moving out".to_string(),
            seller_name: "Dana Smith".to_string(),
            seller_email: "dana@example.com".to_string(),
            seller_phone: Some("5551234567".to_string()),
        }
    }

    #[test]
    fn test_valid_draft() {
        let draft = ListingDraft::new(valid_input()).unwrap();
        assert_eq!(draft.product_name, "Mini fridge");
        assert_eq!(draft.seller_phone.as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_blank_required_field_rejected() {
        let mut input = valid_input();
        input.product_name = "   ".to_string();
        let err = ListingDraft::new(input).unwrap_err();
        assert!(matches!(err, ListingError::MissingField(f) if f == "product_name"));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut input = valid_input();
        input.room_number = "  214B  ".to_string();
        let draft = ListingDraft::new(input).unwrap();
        assert_eq!(draft.room_number, "214B");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut input = valid_input();
        input.seller_email = "not-an-email".to_string();
        let err = ListingDraft::new(input).unwrap_err();
        assert!(matches!(err, ListingError::InvalidField { field, .. } if field == "seller_email"));
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        let mut input = valid_input();
        input.seller_phone = Some("555-123-4567".to_string());
        let err = ListingDraft::new(input).unwrap_err();
        assert!(matches!(err, ListingError::InvalidField { field, .. } if field == "seller_phone"));

        let mut input = valid_input();
        input.seller_phone = Some("12345".to_string());
        assert!(ListingDraft::new(input).is_err());
    }

    #[test]
    fn test_blank_phone_treated_as_absent() {
        let mut input = valid_input();
        input.seller_phone = Some("  ".to_string());
        let draft = ListingDraft::new(input).unwrap();
        assert!(draft.seller_phone.is_none());
    }

    #[test]
    fn test_year_bought_range() {
        let mut input = valid_input();
        input.year_bought = Some(1899);
        assert!(ListingDraft::new(input).is_err());

        let mut input = valid_input();
        input.year_bought = Some(Utc::now().year() + 1);
        assert!(ListingDraft::new(input).is_err());

        let mut input = valid_input();
        input.year_bought = None;
        assert!(ListingDraft::new(input).is_ok());
    }

    mod listing_status {
        use super::*;

        #[test]
        fn test_from_id() {
            assert_eq!(ListingStatus::from_id(0), Some(ListingStatus::Pending));
            assert_eq!(ListingStatus::from_id(1), Some(ListingStatus::Approved));
            assert_eq!(ListingStatus::from_id(2), Some(ListingStatus::Rejected));
            assert_eq!(ListingStatus::from_id(99), None);
        }

        #[test]
        fn test_from_code() {
            assert_eq!(
                ListingStatus::from_code("pending"),
                Some(ListingStatus::Pending)
            );
            assert_eq!(
                ListingStatus::from_code("approved"),
                Some(ListingStatus::Approved)
            );
            assert_eq!(
                ListingStatus::from_code("rejected"),
                Some(ListingStatus::Rejected)
            );
            assert_eq!(ListingStatus::from_code("invalid"), None);
        }

        #[test]
        fn test_display() {
            assert_eq!(ListingStatus::Pending.to_string(), "pending");
            assert_eq!(ListingStatus::Approved.to_string(), "approved");
            assert_eq!(ListingStatus::Rejected.to_string(), "rejected");
        }

        #[test]
        fn test_only_approved_is_public() {
            assert!(!ListingStatus::Pending.is_public());
            assert!(ListingStatus::Approved.is_public());
            assert!(!ListingStatus::Rejected.is_public());
        }

        #[test]
        fn test_default_is_pending() {
            assert_eq!(ListingStatus::default(), ListingStatus::Pending);
        }
    }
}
