//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Listing)
//! - Domain value objects (ListingStatus, ListingDraft)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
