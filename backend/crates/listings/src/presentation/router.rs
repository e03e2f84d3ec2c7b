//! Listings Routers
//!
//! Two routers share one state: the public submission/browse surface and
//! the admin moderation surface. The moderation router carries no auth
//! itself; the binary layers `require_admin_session` over it.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::application::config::ListingsConfig;
use crate::domain::repository::{ListingRepository, SubmissionQuotaRepository};
use crate::infra::postgres::PgListingRepository;
use crate::presentation::handlers::{self, ListingsAppState};

/// Create the public listings router with PostgreSQL repository
pub fn listings_router(repo: PgListingRepository, config: ListingsConfig) -> Router {
    listings_router_generic(repo, config)
}

/// Create the moderation router with PostgreSQL repository
pub fn moderation_router(repo: PgListingRepository, config: ListingsConfig) -> Router {
    moderation_router_generic(repo, config)
}

/// Create a generic public listings router for any repository implementation
pub fn listings_router_generic<R>(repo: R, config: ListingsConfig) -> Router
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let state = ListingsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::public_listings::<R>).post(handlers::submit_listing::<R>),
        )
        .with_state(state)
}

/// Create a generic moderation router for any repository implementation
pub fn moderation_router_generic<R>(repo: R, config: ListingsConfig) -> Router
where
    R: ListingRepository + SubmissionQuotaRepository + Clone + Send + Sync + 'static,
{
    let state = ListingsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/listings", get(handlers::moderation_queue::<R>))
        .route("/listings/{id}/approve", post(handlers::approve_listing::<R>))
        .route("/listings/{id}/reject", post(handlers::reject_listing::<R>))
        .route("/listings/{id}", delete(handlers::delete_listing::<R>))
        .with_state(state)
}
