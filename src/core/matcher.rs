use crate::models::{Listing, Location, LogisticsRequest, NearbyListing};
use crate::core::{
    distance::BoundingBox,
    filters::{matches_category, matches_search, normalize_category, normalize_search},
};

/// Default search radius around the reference point
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 70.0;

/// Predicates for one filter pass
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCriteria {
    pub origin: Location,
    /// Lowercased category, `None` for all categories
    pub category: Option<String>,
    /// Lowercased search term, `None` for no text filter
    pub search: Option<String>,
}

impl MatchCriteria {
    pub fn new(origin: Location) -> Self {
        Self {
            origin,
            category: None,
            search: None,
        }
    }

    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = normalize_category(category);
        self
    }

    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = normalize_search(search);
        self
    }
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult<L> {
    pub matches: Vec<NearbyListing<L>>,
    pub total_candidates: usize,
    /// Candidates dropped because their coordinates were missing or not finite
    pub skipped_invalid: usize,
}

impl<L> MatchResult<L> {
    pub fn into_listings(self) -> Vec<L> {
        self.matches.into_iter().map(|m| m.listing).collect()
    }
}

/// Proximity matcher for marketplace listings
///
/// # Pipeline Stages
/// 1. Lifecycle status, category and text predicates
/// 2. Coordinate sanity check
/// 3. Geospatial bounding box pre-filter
/// 4. Haversine radius check (inclusive)
///
/// Output preserves input order.
#[derive(Debug, Clone, Copy)]
pub struct ListingMatcher {
    max_distance_km: f64,
}

impl ListingMatcher {
    pub fn new(max_distance_km: f64) -> Self {
        Self { max_distance_km }
    }

    pub fn with_default_radius() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE_KM)
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Same matcher with a different radius
    pub fn with_radius(&self, max_distance_km: f64) -> Self {
        Self::new(max_distance_km)
    }

    /// Filter candidates down to the active listings near `criteria.origin`
    ///
    /// # Arguments
    /// * `criteria` - Reference point plus optional category/text predicates
    /// * `candidates` - Listings in display order
    ///
    /// # Returns
    /// MatchResult with the surviving listings in input order
    pub fn find_matches<L, I>(&self, criteria: &MatchCriteria, candidates: I) -> MatchResult<L>
    where
        L: Listing,
        I: IntoIterator<Item = L>,
    {
        let mut total_candidates = 0;
        let mut skipped_invalid = 0;

        if !criteria.origin.is_finite() {
            let total_candidates = candidates.into_iter().count();
            tracing::warn!(
                "Reference point {:?} is not finite, no listings can match",
                criteria.origin
            );
            return MatchResult {
                matches: Vec::new(),
                total_candidates,
                skipped_invalid: 0,
            };
        }

        let bounding_box = BoundingBox::around(criteria.origin, self.max_distance_km);
        let category = criteria.category.as_deref();
        let search = criteria.search.as_deref();

        let mut matches = Vec::new();
        for listing in candidates {
            total_candidates += 1;

            // Stage 1: cheap predicates
            if !listing.is_active()
                || !matches_category(&listing, category)
                || !matches_search(&listing, search)
            {
                continue;
            }

            // Stage 2: malformed coordinates are dropped, not compared
            let location = match listing.location() {
                Some(location) if location.is_finite() => location,
                _ => {
                    skipped_invalid += 1;
                    tracing::warn!("Skipping listing {} with invalid location", listing.id());
                    continue;
                }
            };

            // Stage 3: bounding box
            if !bounding_box.contains(&location) {
                continue;
            }

            // Stage 4: exact distance
            let distance_km = criteria.origin.distance_to(&location);
            if distance_km <= self.max_distance_km {
                matches.push(NearbyListing {
                    listing,
                    distance_km,
                });
            }
        }

        tracing::debug!(
            "Matched {} of {} listings within {}km ({} skipped as invalid)",
            matches.len(),
            total_candidates,
            self.max_distance_km,
            skipped_invalid
        );

        MatchResult {
            matches,
            total_candidates,
            skipped_invalid,
        }
    }

    /// Logistics requests near the caller, excluding the caller's own requests
    pub fn find_nearby_requests(
        &self,
        user_id: &str,
        criteria: &MatchCriteria,
        requests: Vec<LogisticsRequest>,
    ) -> MatchResult<LogisticsRequest> {
        let total = requests.len();
        let others = requests.into_iter().filter(|r| r.user_id != user_id);

        let mut result = self.find_matches(criteria, others);
        result.total_candidates = total;
        result
    }
}

impl Default for ListingMatcher {
    fn default() -> Self {
        Self::with_default_radius()
    }
}
