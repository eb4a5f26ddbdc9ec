// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod pagination;
pub mod pricing;

pub use distance::{haversine_distance, is_within_radius, BoundingBox, EARTH_RADIUS_KM};
pub use filters::{equipment_categories, matches_category, matches_search};
pub use matcher::{ListingMatcher, MatchCriteria, MatchResult, DEFAULT_MAX_DISTANCE_KM};
pub use pagination::{Page, PaginationError, Paginator, DEFAULT_PAGE_SIZE};
pub use pricing::quote_rental;
