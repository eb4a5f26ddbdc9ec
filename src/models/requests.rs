use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{EquipmentType, Location, LogisticsDirection};

/// Request to browse nearby equipment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchEquipmentRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    #[serde(default, alias = "page_size", rename = "pageSize")]
    pub page_size: Option<usize>,
    #[validate(range(min = 0.0, max = 20100.0))]
    #[serde(default, alias = "max_distance_km", rename = "maxDistanceKm")]
    pub max_distance_km: Option<f64>,
}

impl SearchEquipmentRequest {
    pub fn origin(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

fn default_page() -> usize {
    1
}

/// Owner lists a new piece of equipment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEquipmentRequest {
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(length(min = 1))]
    pub brand: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default, alias = "hourly_rate", rename = "hourlyRate")]
    pub hourly_rate: Option<f64>,
    #[validate(range(min = 1.0))]
    #[serde(alias = "daily_rate", rename = "dailyRate")]
    pub daily_rate: f64,
    #[serde(default, alias = "operator_included", rename = "operatorIncluded")]
    pub operator_included: bool,
    #[serde(default, alias = "image_url", rename = "imageUrl")]
    pub image_url: String,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(alias = "lon")]
    pub longitude: f64,
}

/// Owner edits a listing; absent fields stay as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEquipmentRequest {
    #[validate(length(min = 1))]
    pub model: Option<String>,
    #[validate(length(min = 1))]
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<EquipmentType>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default, alias = "hourly_rate", rename = "hourlyRate")]
    pub hourly_rate: Option<f64>,
    #[validate(range(min = 1.0))]
    #[serde(default, alias = "daily_rate", rename = "dailyRate")]
    pub daily_rate: Option<f64>,
    #[serde(default, alias = "operator_included", rename = "operatorIncluded")]
    pub operator_included: Option<bool>,
    #[serde(default, alias = "image_url", rename = "imageUrl")]
    pub image_url: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default, alias = "lon")]
    pub longitude: Option<f64>,
}

impl UpdateEquipmentRequest {
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.brand.is_none()
            && self.equipment_type.is_none()
            && self.description.is_none()
            && self.hourly_rate.is_none()
            && self.daily_rate.is_none()
            && self.operator_included.is_none()
            && self.image_url.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }
}

/// Request to list logistics requests posted near the caller
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyLogisticsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[validate(range(min = 0.0, max = 20100.0))]
    #[serde(default, alias = "max_distance_km", rename = "maxDistanceKm")]
    pub max_distance_km: Option<f64>,
}

impl NearbyLogisticsRequest {
    pub fn origin(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

/// Request to post a new logistics request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLogisticsRequest {
    #[serde(rename = "type")]
    pub direction: LogisticsDirection,
    #[validate(length(min = 2))]
    pub goods: String,
    #[validate(length(min = 1))]
    pub quantity: String,
    #[validate(length(min = 2))]
    pub destination: String,
    #[validate(length(min = 5))]
    pub date: String,
}

/// Request a rental price quote
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "daily_rate", rename = "dailyRate")]
    pub daily_rate: f64,
    #[serde(alias = "start_ts", rename = "start")]
    pub start: chrono::DateTime<chrono::Utc>,
    #[serde(alias = "end_ts", rename = "end")]
    pub end: chrono::DateTime<chrono::Utc>,
}

/// Request to book a piece of equipment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "equipment_id", rename = "equipmentId")]
    pub equipment_id: String,
    #[serde(alias = "start_ts", rename = "start")]
    pub start: chrono::DateTime<chrono::Utc>,
    #[serde(alias = "end_ts", rename = "end")]
    pub end: chrono::DateTime<chrono::Utc>,
}

/// Owner offers equipment for a date range
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilityRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "equipment_id", rename = "equipmentId")]
    pub equipment_id: String,
    #[serde(alias = "start_date", rename = "startDate")]
    pub start_date: chrono::NaiveDate,
    #[serde(alias = "end_date", rename = "endDate")]
    pub end_date: chrono::NaiveDate,
}

/// Request to rate a completed booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RatingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "booking_id", rename = "bookingId")]
    pub booking_id: String,
    #[validate(range(min = 1, max = 5))]
    pub stars: u8,
    #[serde(default)]
    pub comment: String,
}
