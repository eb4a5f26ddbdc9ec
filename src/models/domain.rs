use serde::{Deserialize, Serialize};

/// A point on the earth's surface in degrees (WGS-84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both coordinates are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance to another location in kilometers
    #[inline]
    pub fn distance_to(&self, other: &Location) -> f64 {
        crate::core::distance::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Anything the listing matcher can filter: equipment, logistics requests, ...
pub trait Listing {
    fn id(&self) -> &str;

    /// Category label compared case-insensitively against the category filter
    fn category(&self) -> &str;

    /// `None` when the listing has no usable location
    fn location(&self) -> Option<Location>;

    /// Whether the listing is in its active/approved lifecycle state
    fn is_active(&self) -> bool;

    /// Text fields searched by the free-text filter
    fn search_fields(&self) -> Vec<&str>;
}

impl<T: Listing + ?Sized> Listing for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn category(&self) -> &str {
        (**self).category()
    }

    fn location(&self) -> Option<Location> {
        (**self).location()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentType {
    Tractor,
    Harvester,
    Sprayer,
    Rotavator,
    Plough,
    Other,
}

impl EquipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Tractor => "TRACTOR",
            EquipmentType::Harvester => "HARVESTER",
            EquipmentType::Sprayer => "SPRAYER",
            EquipmentType::Rotavator => "ROTAVATOR",
            EquipmentType::Plough => "PLOUGH",
            EquipmentType::Other => "OTHER",
        }
    }
}

/// Equipment approval lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Draft,
    PendingReview,
    Approved,
    Rejected,
    Blocked,
}

/// Rentable equipment as returned by the marketplace backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub description: Option<String>,
    pub daily_rate: f64,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub operator_included: bool,
    pub lat: f64,
    pub lon: f64,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub availability: bool,
}

impl Listing for Equipment {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        self.equipment_type.as_str()
    }

    fn location(&self) -> Option<Location> {
        Some(Location::new(self.lat, self.lon))
    }

    fn is_active(&self) -> bool {
        self.status == EquipmentStatus::Approved
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.model.as_str(), self.brand.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogisticsDirection {
    Import,
    Export,
}

impl LogisticsDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogisticsDirection::Import => "Import",
            LogisticsDirection::Export => "Export",
        }
    }
}

/// Transport-sharing request posted by a farmer
///
/// The requester's location is joined in by the backend and may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsRequest {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub direction: LogisticsDirection,
    pub goods: String,
    pub destination: String,
    pub date: String,
    pub quantity: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl Listing for LogisticsRequest {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        self.direction.as_str()
    }

    fn location(&self) -> Option<Location> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Location::new(lat, lon)),
            _ => None,
        }
    }

    // Open requests are all listed; the backend drops closed ones
    fn is_active(&self) -> bool {
        true
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.goods.as_str(), self.destination.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
    Completed,
    Expired,
}

/// Booking record returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub equipment_id: String,
    pub user_id: String,
    pub owner_id: String,
    pub start_ts: chrono::DateTime<chrono::Utc>,
    pub end_ts: chrono::DateTime<chrono::Utc>,
    pub status: BookingStatus,
    pub total_price: f64,
}

/// Date range in which an owner offers a piece of equipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub equipment_id: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

/// Owner decision on a booking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    Accept,
    Reject,
}

impl BookingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::Accept => "accept",
            BookingAction::Reject => "reject",
        }
    }
}

/// Admin decision on an equipment listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    Approve,
    Reject,
}

impl ApprovalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalAction::Approve => "approve",
            ApprovalAction::Reject => "reject",
        }
    }
}

/// A listing that passed the proximity filter, with its distance from the origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyListing<L> {
    #[serde(flatten)]
    pub listing: L,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}
