// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ApprovalAction, AvailabilityWindow, Booking, BookingAction, BookingStatus, Equipment,
    EquipmentStatus, EquipmentType, Listing, Location, LogisticsDirection, LogisticsRequest,
    NearbyListing,
};
pub use requests::{
    AvailabilityRequest, CreateBookingRequest, CreateEquipmentRequest, CreateLogisticsRequest,
    NearbyLogisticsRequest, QuoteRequest, RatingRequest, SearchEquipmentRequest,
    UpdateEquipmentRequest,
};
pub use responses::{
    CategoriesResponse, ErrorResponse, HealthResponse, NearbyLogisticsResponse, QuoteResponse,
    SearchEquipmentResponse,
};
