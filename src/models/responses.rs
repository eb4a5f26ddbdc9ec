use serde::{Deserialize, Serialize};
use crate::core::pagination::Page;
use crate::models::domain::{Equipment, LogisticsRequest, NearbyListing};

/// Response for the equipment search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEquipmentResponse {
    #[serde(flatten)]
    pub page: Page<NearbyListing<Equipment>>,
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: f64,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the nearby logistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyLogisticsResponse {
    pub requests: Vec<NearbyListing<LogisticsRequest>>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: f64,
}

/// Category facet for the browse page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Rental price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub days: i64,
    #[serde(rename = "totalPrice")]
    pub total_price: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
