//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod browse_listings;
pub mod config;
pub mod moderate_listing;
pub mod submit_listing;
