//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use platform::client::SourceAddress;

use crate::application::browse_listings::BrowseListingsUseCase;
use crate::application::config::ListingsConfig;
use crate::application::moderate_listing::ModerateListingUseCase;
use crate::application::submit_listing::SubmitListingUseCase;
use crate::domain::repository::{ListingRepository, SubmissionQuotaRepository};
use crate::domain::value_objects::ListingStatus;
use crate::error::{ListingError, ListingResult};
use crate::presentation::dto::{
    ListingItem, MessageResponse, ModerationQuery, SubmitListingRequest, SubmitListingResponse,
};

/// Shared state for listing handlers
#[derive(Clone)]
pub struct ListingsAppState<R>
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ListingsConfig>,
}

/// GET /api/listings
pub async fn public_listings<R>(
    State(state): State<ListingsAppState<R>>,
) -> ListingResult<Json<Vec<ListingItem>>>
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let use_case = BrowseListingsUseCase::new(state.repo.clone());
    let listings = use_case.public_listings().await?;

    Ok(Json(listings.into_iter().map(ListingItem::from).collect()))
}

/// POST /api/listings
pub async fn submit_listing<R>(
    State(state): State<ListingsAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SubmitListingRequest>,
) -> ListingResult<impl IntoResponse>
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let source = SourceAddress::from_request(
        &headers,
        Some(addr.ip()),
        state.config.trust_forwarded_headers,
    )
    .ok_or_else(|| ListingError::Internal("client address unavailable".to_string()))?;

    let use_case =
        SubmitListingUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case.execute(req.into(), source).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitListingResponse {
            success: true,
            message: "Listing submitted for review".to_string(),
            product_id: output.listing_id,
        }),
    ))
}

/// GET /api/admin/listings
pub async fn moderation_queue<R>(
    State(state): State<ListingsAppState<R>>,
    Query(query): Query<ModerationQuery>,
) -> ListingResult<Json<Vec<ListingItem>>>
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let status = match query.status.as_deref() {
        Some(code) => Some(ListingStatus::from_code(code).ok_or_else(|| {
            ListingError::InvalidField {
                field: "status".to_string(),
                reason: "must be pending, approved, or rejected".to_string(),
            }
        })?),
        None => None,
    };

    let use_case = BrowseListingsUseCase::new(state.repo.clone());
    let listings = use_case.moderation_queue(status).await?;

    Ok(Json(listings.into_iter().map(ListingItem::from).collect()))
}

/// POST /api/admin/listings/{id}/approve
pub async fn approve_listing<R>(
    State(state): State<ListingsAppState<R>>,
    Path(id): Path<i64>,
) -> ListingResult<Json<MessageResponse>>
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let use_case = ModerateListingUseCase::new(state.repo.clone());
    use_case.approve(id).await?;

    Ok(Json(MessageResponse::ok("Listing approved")))
}

/// POST /api/admin/listings/{id}/reject
pub async fn reject_listing<R>(
    State(state): State<ListingsAppState<R>>,
    Path(id): Path<i64>,
) -> ListingResult<Json<MessageResponse>>
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let use_case = ModerateListingUseCase::new(state.repo.clone());
    use_case.reject(id).await?;

    Ok(Json(MessageResponse::ok("Listing rejected")))
}

/// DELETE /api/admin/listings/{id}
pub async fn delete_listing<R>(
    State(state): State<ListingsAppState<R>>,
    Path(id): Path<i64>,
) -> ListingResult<Json<MessageResponse>>
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let use_case = ModerateListingUseCase::new(state.repo.clone());
    use_case.delete(id).await?;

    Ok(Json(MessageResponse::ok("Listing deleted")))
}
