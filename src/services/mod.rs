// Service exports
pub mod backend;
pub mod cache;

pub use backend::{
    BackendClient, BackendError, BookingPayload, EquipmentPayload, EquipmentUpdate, LogisticsPayload,
    RatingPayload,
};
pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
