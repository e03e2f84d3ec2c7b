//! Unit tests for listings crate
//! Target: C0 coverage 100%, C1 coverage 80%

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;

    #[test]
    fn test_default_config() {
        let config = ListingsConfig::default();

        assert_eq!(config.quota.max_per_day, 10);
        assert_eq!(config.quota_retention_days, 30);
        assert!(!config.trust_forwarded_headers);
    }

    #[test]
    fn test_quota_decisions() {
        let config = ListingsConfig::default();

        // The 10th submission of the day is the last allowed one
        assert!(config.quota.decide(10).allowed);
        assert!(!config.quota.decide(11).allowed);
        assert_eq!(config.quota.decide(10).remaining, 0);
        assert_eq!(config.quota.decide(1).remaining, 9);
    }
}

#[cfg(test)]
mod dto_tests {
    use chrono::Utc;
    use platform::client::SourceAddress;

    use crate::domain::entities::Listing;
    use crate::domain::value_objects::{ListingDraft, ListingDraftInput, ListingStatus};
    use crate::presentation::dto::*;

    fn sample_listing() -> Listing {
        let draft = ListingDraft::new(ListingDraftInput {
            product_name: "Mini fridge".to_string(),
            product_condition: "Good".to_string(),
            room_number: "214B".to_string(),
            year_bought: Some(2023),
            image_url: "https://img.example.com/fridge.jpg".to_string(),
            description: "Barely used".to_string(),
            seller_name: "Dana Smith".to_string(),
            seller_email: "dana@example.com".to_string(),
            seller_phone: None,
        })
        .unwrap();

        Listing::from_parts(
            42,
            draft,
            ListingStatus::Approved,
            SourceAddress::from_db("192.0.2.1"),
            Utc::now(),
        )
    }

    #[test]
    fn test_submit_request_deserialization() {
        let json = r#"{
            "product_name": "Mini fridge",
            "product_condition": "Good",
            "room_number": "214B",
            "image_url": "https://img.example.com/fridge.jpg",
            "description": "Barely used",
            "seller_name": "Dana Smith",
            "seller_email": "dana@example.com"
        }"#;
        let request: SubmitListingRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.product_name, "Mini fridge");
        assert!(request.year_bought.is_none());
        assert!(request.seller_phone.is_none());
    }

    #[test]
    fn test_submit_request_with_optional_fields() {
        let json = r#"{
            "product_name": "Mini fridge",
            "product_condition": "Good",
            "room_number": "214B",
            "year_bought": 2023,
            "image_url": "https://img.example.com/fridge.jpg",
            "description": "Barely used",
            "seller_name": "Dana Smith",
            "seller_email": "dana@example.com",
            "seller_phone": "5551234567"
        }"#;
        let request: SubmitListingRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.year_bought, Some(2023));
        assert_eq!(request.seller_phone.as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_submit_response_serialization() {
        let response = SubmitListingResponse {
            success: true,
            message: "Listing submitted for review".to_string(),
            product_id: 42,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""product_id":42"#));
        assert!(json.contains(r#""message":"Listing submitted for review""#));
    }

    #[test]
    fn test_listing_item_from_entity() {
        let item = ListingItem::from(sample_listing());

        assert_eq!(item.product_id, 42);
        assert_eq!(item.status, "approved");

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""product_id":42"#));
        assert!(json.contains(r#""status":"approved""#));
        // Absent phone is omitted, not null
        assert!(!json.contains("seller_phone"));
    }

    #[test]
    fn test_moderation_query_defaults() {
        let query: ModerationQuery = serde_json::from_str("{}").unwrap();
        assert!(query.status.is_none());

        let query: ModerationQuery = serde_json::from_str(r#"{"status":"rejected"}"#).unwrap();
        assert_eq!(query.status.as_deref(), Some("rejected"));
    }
}

/// In-memory repository standing in for Postgres, so the use cases can
/// be exercised end to end without a database.
#[cfg(test)]
mod memory_store {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{NaiveDate, Utc};
    use platform::client::SourceAddress;

    use crate::domain::entities::Listing;
    use crate::domain::repository::{ListingRepository, SubmissionQuotaRepository};
    use crate::domain::value_objects::{ListingDraft, ListingStatus};
    use crate::error::ListingResult;

    #[derive(Clone, Default)]
    pub struct MemoryStore {
        pub listings: Arc<Mutex<Vec<Listing>>>,
        pub quotas: Arc<Mutex<HashMap<(String, NaiveDate), u32>>>,
    }

    impl MemoryStore {
        pub fn listing_count(&self) -> usize {
            self.listings.lock().unwrap().len()
        }

        pub fn quota_row_count(&self) -> usize {
            self.quotas.lock().unwrap().len()
        }

        /// Pre-load a counter row, e.g. an exhausted quota from a past day
        pub fn seed_quota(&self, source: &str, date: NaiveDate, count: u32) {
            self.quotas
                .lock()
                .unwrap()
                .insert((source.to_string(), date), count);
        }
    }

    impl ListingRepository for MemoryStore {
        async fn create(&self, draft: &ListingDraft, source: &SourceAddress) -> ListingResult<i64> {
            let mut listings = self.listings.lock().unwrap();
            let id = listings.len() as i64 + 1;
            listings.push(Listing::from_parts(
                id,
                draft.clone(),
                ListingStatus::Pending,
                source.clone(),
                Utc::now(),
            ));
            Ok(id)
        }

        async fn find_by_id(&self, id: i64) -> ListingResult<Option<Listing>> {
            Ok(self
                .listings
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id == id)
                .cloned())
        }

        async fn list_approved(&self) -> ListingResult<Vec<Listing>> {
            self.list_by_status(ListingStatus::Approved).await
        }

        async fn list_by_status(&self, status: ListingStatus) -> ListingResult<Vec<Listing>> {
            Ok(self
                .listings
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.status == status)
                .cloned()
                .collect())
        }

        async fn update_status(&self, id: i64, status: ListingStatus) -> ListingResult<bool> {
            let mut listings = self.listings.lock().unwrap();
            match listings.iter_mut().find(|l| l.id == id) {
                Some(listing) => {
                    listing.status = status;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: i64) -> ListingResult<bool> {
            let mut listings = self.listings.lock().unwrap();
            let before = listings.len();
            listings.retain(|l| l.id != id);
            Ok(listings.len() < before)
        }
    }

    impl SubmissionQuotaRepository for MemoryStore {
        async fn register_submission(
            &self,
            source: &SourceAddress,
            date: NaiveDate,
        ) -> ListingResult<u32> {
            let mut quotas = self.quotas.lock().unwrap();
            let count = quotas
                .entry((source.as_str().to_string(), date))
                .or_insert(0);
            *count += 1;
            Ok(*count)
        }
    }
}

#[cfg(test)]
mod submission_flow_tests {
    use std::sync::Arc;

    use chrono::Utc;
    use platform::client::SourceAddress;

    use super::memory_store::MemoryStore;
    use crate::application::config::ListingsConfig;
    use crate::application::submit_listing::SubmitListingUseCase;
    use crate::domain::value_objects::ListingDraftInput;
    use crate::error::ListingError;

    fn draft_input() -> ListingDraftInput {
        ListingDraftInput {
            product_name: "Mini fridge".to_string(),
            product_condition: "Good".to_string(),
            room_number: "214B".to_string(),
            year_bought: Some(2023),
            image_url: "https://img.example.com/fridge.jpg".to_string(),
            description: "Barely used".to_string(),
            seller_name: "Dana Smith".to_string(),
            seller_email: "dana@example.com".to_string(),
            seller_phone: None,
        }
    }

    fn use_case(store: &MemoryStore) -> SubmitListingUseCase<MemoryStore, MemoryStore> {
        SubmitListingUseCase::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(ListingsConfig::default()),
        )
    }

    fn source() -> SourceAddress {
        SourceAddress::from_db("192.0.2.1")
    }

    #[tokio::test]
    async fn test_eleventh_submission_refused() {
        let store = MemoryStore::default();
        let use_case = use_case(&store);

        for _ in 0..10 {
            use_case.execute(draft_input(), source()).await.unwrap();
        }

        let result = use_case.execute(draft_input(), source()).await;
        assert!(matches!(result, Err(ListingError::QuotaExceeded)));

        // The refused submission was not persisted
        assert_eq!(store.listing_count(), 10);
    }

    #[tokio::test]
    async fn test_quota_counted_per_source() {
        let store = MemoryStore::default();
        let use_case = use_case(&store);

        for _ in 0..10 {
            use_case.execute(draft_input(), source()).await.unwrap();
        }

        // A different address still has its full quota
        let other = SourceAddress::from_db("192.0.2.2");
        use_case.execute(draft_input(), other).await.unwrap();
        assert_eq!(store.listing_count(), 11);
    }

    #[tokio::test]
    async fn test_invalid_payload_consumes_no_quota() {
        let store = MemoryStore::default();
        let use_case = use_case(&store);

        let mut input = draft_input();
        input.product_name = "   ".to_string();

        let result = use_case.execute(input, source()).await;
        assert!(matches!(result, Err(ListingError::MissingField(f)) if f == "product_name"));

        // Nothing persisted, no counter touched
        assert_eq!(store.listing_count(), 0);
        assert_eq!(store.quota_row_count(), 0);
    }

    #[tokio::test]
    async fn test_quota_starts_fresh_on_a_new_day() {
        let store = MemoryStore::default();
        let yesterday = Utc::now().date_naive().pred_opt().unwrap();

        // Yesterday's counter is exhausted
        store.seed_quota("192.0.2.1", yesterday, 10);

        // Today's submission starts a fresh counter and succeeds
        let use_case = use_case(&store);
        use_case.execute(draft_input(), source()).await.unwrap();
        assert_eq!(store.listing_count(), 1);
    }
}

#[cfg(test)]
mod moderation_flow_tests {
    use std::sync::Arc;

    use super::memory_store::MemoryStore;
    use super::submission_flow_tests_support::submit_one;
    use crate::application::browse_listings::BrowseListingsUseCase;
    use crate::application::moderate_listing::ModerateListingUseCase;
    use crate::domain::value_objects::ListingStatus;
    use crate::error::ListingError;

    #[tokio::test]
    async fn test_approve_unknown_id_not_found() {
        let store = MemoryStore::default();
        let use_case = ModerateListingUseCase::new(Arc::new(store));

        let result = use_case.approve(9999).await;
        assert!(matches!(result, Err(ListingError::ListingNotFound)));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_not_found() {
        let store = MemoryStore::default();
        let use_case = ModerateListingUseCase::new(Arc::new(store));

        let result = use_case.delete(9999).await;
        assert!(matches!(result, Err(ListingError::ListingNotFound)));
    }

    #[tokio::test]
    async fn test_only_approved_listings_are_public() {
        let store = MemoryStore::default();
        let approved_id = submit_one(&store).await;
        let rejected_id = submit_one(&store).await;
        let _pending_id = submit_one(&store).await;

        let moderate = ModerateListingUseCase::new(Arc::new(store.clone()));
        moderate.approve(approved_id).await.unwrap();
        moderate.reject(rejected_id).await.unwrap();

        let browse = BrowseListingsUseCase::new(Arc::new(store.clone()));
        let public = browse.public_listings().await.unwrap();

        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, approved_id);
        assert_eq!(public[0].status, ListingStatus::Approved);
    }

    #[tokio::test]
    async fn test_moderation_queue_defaults_to_pending() {
        let store = MemoryStore::default();
        let first = submit_one(&store).await;
        let second = submit_one(&store).await;

        let moderate = ModerateListingUseCase::new(Arc::new(store.clone()));
        moderate.approve(first).await.unwrap();

        let browse = BrowseListingsUseCase::new(Arc::new(store));
        let queue = browse.moderation_queue(None).await.unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, second);
    }
}

/// Helpers shared by the flow tests
#[cfg(test)]
mod submission_flow_tests_support {
    use std::sync::Arc;

    use platform::client::SourceAddress;

    use super::memory_store::MemoryStore;
    use crate::application::config::ListingsConfig;
    use crate::application::submit_listing::SubmitListingUseCase;
    use crate::domain::value_objects::ListingDraftInput;

    /// Submit one valid listing and return its id
    pub async fn submit_one(store: &MemoryStore) -> i64 {
        let use_case = SubmitListingUseCase::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(ListingsConfig::default()),
        );

        let input = ListingDraftInput {
            product_name: "Desk lamp".to_string(),
            product_condition: "Like new".to_string(),
            room_number: "101".to_string(),
            year_bought: None,
            image_url: "https://img.example.com/lamp.jpg".to_string(),
            description: "Warm white LED".to_string(),
            seller_name: "Sam Lee".to_string(),
            seller_email: "sam@example.com".to_string(),
            seller_phone: None,
        };

        use_case
            .execute(input, SourceAddress::from_db("192.0.2.7"))
            .await
            .unwrap()
            .listing_id
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::error::*;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(ListingError, StatusCode)> = vec![
            (
                ListingError::MissingField("product_name".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ListingError::InvalidField {
                    field: "seller_email".into(),
                    reason: "invalid email format".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (ListingError::QuotaExceeded, StatusCode::TOO_MANY_REQUESTS),
            (ListingError::ListingNotFound, StatusCode::NOT_FOUND),
            (
                ListingError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_error_display() {
        assert!(
            ListingError::MissingField("room_number".into())
                .to_string()
                .contains("room_number")
        );
        assert!(ListingError::QuotaExceeded.to_string().contains("limit"));
        assert!(
            ListingError::ListingNotFound
                .to_string()
                .contains("not found")
        );
    }

    #[test]
    fn test_internal_errors_not_leaked() {
        // The response body for server-side failures must not carry details
        let error = ListingError::Internal("pool exhausted at 10.0.0.5".into());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
