//! Listings Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Moderation Model
//! - Every submission enters the queue as `pending`; only an authenticated
//!   moderation action changes its status
//! - Pending and rejected listings are never served publicly
//! - Submissions are capped per source address per calendar day
//! - The quota counter is a single atomic upsert (no read-modify-write)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ListingsConfig;
pub use error::{ListingError, ListingResult};
pub use infra::postgres::PgListingRepository;
pub use presentation::router::{listings_router, moderation_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
