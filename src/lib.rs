//! TechnoTrac Match - proximity matching for the TechnoTrac equipment rental marketplace
//!
//! This library provides the listing matcher used by the equipment browse and
//! logistics collaboration pages: haversine radius filtering, category and
//! text predicates, pagination and rental quotes, plus the HTTP service that
//! serves them from the marketplace backend.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::haversine_distance, ListingMatcher, MatchCriteria, MatchResult, Page, Paginator,
};
pub use crate::models::{Equipment, Listing, Location, LogisticsRequest, NearbyListing};
