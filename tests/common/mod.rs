// Shared marketplace fixtures for integration tests
#![allow(dead_code)]

use technotrac_match::models::{
    Equipment, EquipmentStatus, EquipmentType, Location, LogisticsDirection, LogisticsRequest,
};

/// Ludhiana, Punjab: the logged-in farmer's registered location
pub fn ludhiana() -> Location {
    Location::new(30.9010, 75.8573)
}

pub fn equipment(
    id: &str,
    equipment_type: EquipmentType,
    brand: &str,
    model: &str,
    lat: f64,
    lon: f64,
    status: EquipmentStatus,
) -> Equipment {
    Equipment {
        id: id.to_string(),
        owner_id: "owner".to_string(),
        equipment_type,
        brand: brand.to_string(),
        model: model.to_string(),
        description: None,
        daily_rate: 5000.0,
        hourly_rate: None,
        operator_included: true,
        lat,
        lon,
        status,
        created_at: None,
        image_url: String::new(),
        availability: true,
    }
}

/// Catalogue as the backend returns it; distances are from Ludhiana
pub fn catalogue() -> Vec<Equipment> {
    use EquipmentStatus::*;
    use EquipmentType::*;

    vec![
        equipment("eq-1", Tractor, "Mahindra", "JIVO 365 DI", 30.9010, 75.8573, Approved),        // 0 km
        equipment("eq-2", Harvester, "Shaktiman", "Paddy Master", 29.6857, 76.9905, Approved),    // Karnal, 173 km
        equipment("eq-3", Tractor, "Swaraj", "717", 28.9845, 77.7064, Approved),                  // Meerut, 278 km
        equipment("eq-4", Plough, "Lemken", "Plough", 31.6340, 74.8723, PendingReview),           // Amritsar, 124 km
        equipment("eq-5", Sprayer, "Shrachi Agrimech", "Shrachi 15", 29.1492, 75.7217, Approved), // Hisar, 195 km
        equipment("eq-6", Other, "Dasmesh", "912 Seed Drill", 28.6600, 77.2300, PendingReview),   // Delhi, 282 km
        equipment("eq-7", Tractor, "Sonalika", "DI 745 III", 30.7870, 75.4730, Approved),         // Jagraon, 39 km
        equipment("eq-8", Harvester, "Kartar", "4000", 30.7050, 76.2220, Approved),               // Khanna, 41 km
        equipment("eq-9", Rotavator, "Shaktiman", "Regular Light", 31.2240, 75.7740, Approved),   // Phagwara, 37 km
        equipment("eq-10", Plough, "Lemken", "Opal 090", 30.8160, 75.1700, PendingReview),        // Moga, 66 km
        equipment("eq-11", Sprayer, "Aspee", "Bolo", 31.3260, 75.5760, Approved),                 // Jalandhar, 54 km
        equipment("eq-12", Tractor, "John Deere", "5050D", 30.2450, 75.8440, Approved),           // Sangrur, 73 km
    ]
}

pub fn logistics_request(
    id: &str,
    user_id: &str,
    direction: LogisticsDirection,
    goods: &str,
    destination: &str,
    location: Option<(f64, f64)>,
) -> LogisticsRequest {
    LogisticsRequest {
        id: id.to_string(),
        user_id: user_id.to_string(),
        direction,
        goods: goods.to_string(),
        destination: destination.to_string(),
        date: "Next week".to_string(),
        quantity: "10 tonnes".to_string(),
        lat: location.map(|l| l.0),
        lon: location.map(|l| l.1),
    }
}

pub fn logistics_requests() -> Vec<LogisticsRequest> {
    use LogisticsDirection::*;

    vec![
        logistics_request("log-1", "user-1", Export, "Wheat", "Delhi Mandi", Some((30.9010, 75.8573))),
        logistics_request("log-2", "user-2", Import, "Fertilizer", "Karnal", Some((29.6857, 76.9905))),
        logistics_request("log-3", "user-3", Export, "Basmati Rice", "Mumbai Port", Some((31.6340, 74.8723))),
        logistics_request("log-4", "user-4", Export, "Potatoes", "Chandigarh", Some((30.7870, 75.4730))),
        logistics_request("log-5", "user-5", Import, "Seeds", "Ludhiana", None),
    ]
}
