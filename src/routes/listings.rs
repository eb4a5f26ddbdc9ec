use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::core::{equipment_categories, MatchCriteria, Paginator};
use crate::models::{
    CategoriesResponse, CreateEquipmentRequest, CreateLogisticsRequest, HealthResponse,
    NearbyLogisticsRequest, NearbyLogisticsResponse, SearchEquipmentRequest, SearchEquipmentResponse,
    UpdateEquipmentRequest,
};
use crate::routes::{
    backend_failed, bearer_token, error_response, invalidate_catalogue, load_catalogue, missing_token,
    validation_failed, AppState,
};
use crate::services::{EquipmentPayload, EquipmentUpdate, LogisticsPayload};

/// Configure listing browse routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/equipment/search", web::post().to(search_equipment))
        .route("/equipment/categories", web::get().to(list_categories))
        .route("/equipment", web::post().to(create_equipment))
        .route("/equipment/{equipment_id}", web::patch().to(update_equipment))
        .route("/logistics/nearby", web::post().to(nearby_logistics))
        .route("/logistics", web::post().to(create_logistics));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search nearby equipment
///
/// POST /api/v1/equipment/search
///
/// Request body:
/// ```json
/// {
///   "latitude": 30.901,
///   "longitude": 75.8573,
///   "search": "mahindra",
///   "category": "tractor",
///   "page": 1,
///   "pageSize": 8,
///   "maxDistanceKm": 70
/// }
/// ```
async fn search_equipment(
    state: web::Data<AppState>,
    req: web::Json<SearchEquipmentRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    let matcher = match req.max_distance_km {
        Some(radius) => state.matcher.with_radius(radius),
        None => state.matcher,
    };

    let paginator = match req.page_size {
        Some(size) => match Paginator::new(size.min(state.max_page_size)) {
            Ok(p) => p,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, "Invalid page size", e),
        },
        None => state.paginator,
    };

    let catalogue = match load_catalogue(&state, &token).await {
        Ok(catalogue) => catalogue,
        Err(e) => return backend_failed("Failed to fetch equipment", e),
    };

    let criteria = MatchCriteria::new(req.origin())
        .with_category(req.category.as_deref())
        .with_search(req.search.as_deref());

    let result = matcher.find_matches(&criteria, catalogue);
    let total_candidates = result.total_candidates;
    let page = paginator.paginate(result.matches, req.page);

    tracing::info!(
        "Equipment search: {} within {}km of ({}, {}), page {}/{}",
        page.total_items,
        matcher.max_distance_km(),
        req.latitude,
        req.longitude,
        page.page,
        page.total_pages
    );

    HttpResponse::Ok().json(SearchEquipmentResponse {
        page,
        max_distance_km: matcher.max_distance_km(),
        total_candidates,
    })
}

/// Category facet for the equipment browse page
///
/// GET /api/v1/equipment/categories
async fn list_categories(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match load_catalogue(&state, &token).await {
        Ok(catalogue) => HttpResponse::Ok().json(CategoriesResponse {
            categories: equipment_categories(&catalogue),
        }),
        Err(e) => backend_failed("Failed to fetch equipment", e),
    }
}

/// Owner lists a new piece of equipment
///
/// POST /api/v1/equipment
async fn create_equipment(
    state: web::Data<AppState>,
    req: web::Json<CreateEquipmentRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    let req = req.into_inner();
    let payload = EquipmentPayload {
        model: req.model,
        brand: req.brand,
        equipment_type: req.equipment_type,
        description: req.description,
        hourly_rate: req.hourly_rate,
        daily_rate: req.daily_rate,
        operator_included: req.operator_included,
        image_url: req.image_url,
        lat: req.latitude,
        lon: req.longitude,
    };

    match state.backend.create_equipment(&payload, &token).await {
        Ok(created) => {
            tracing::info!("New {} listing submitted for review", payload.equipment_type.as_str());
            invalidate_catalogue(&state).await;
            HttpResponse::Created().json(created)
        }
        Err(e) => backend_failed("Failed to submit equipment", e),
    }
}

/// Owner edits a listing
///
/// PATCH /api/v1/equipment/{equipment_id}
async fn update_equipment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateEquipmentRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    if req.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Nothing to update", "Request body has no fields");
    }

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    let equipment_id = path.into_inner();
    let req = req.into_inner();
    let update = EquipmentUpdate {
        model: req.model,
        brand: req.brand,
        equipment_type: req.equipment_type,
        description: req.description,
        hourly_rate: req.hourly_rate,
        daily_rate: req.daily_rate,
        operator_included: req.operator_included,
        image_url: req.image_url,
        lat: req.latitude,
        lon: req.longitude,
    };

    match state.backend.update_equipment(&equipment_id, &update, &token).await {
        Ok(updated) => {
            invalidate_catalogue(&state).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => backend_failed("Failed to update equipment", e),
    }
}

/// Logistics requests posted by other farmers nearby
///
/// POST /api/v1/logistics/nearby
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "latitude": 30.901,
///   "longitude": 75.8573,
///   "category": "export",
///   "search": "wheat"
/// }
/// ```
async fn nearby_logistics(
    state: web::Data<AppState>,
    req: web::Json<NearbyLogisticsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    let requests = match state.backend.fetch_logistics_requests(&token).await {
        Ok(requests) => requests,
        Err(e) => return backend_failed("Failed to fetch logistics requests", e),
    };

    let matcher = match req.max_distance_km {
        Some(radius) => state.matcher.with_radius(radius),
        None => state.matcher,
    };

    let criteria = MatchCriteria::new(req.origin())
        .with_category(req.category.as_deref())
        .with_search(req.search.as_deref());

    let result = matcher.find_nearby_requests(&req.user_id, &criteria, requests);

    tracing::info!(
        "Returning {} nearby logistics requests for user {} (from {})",
        result.matches.len(),
        req.user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(NearbyLogisticsResponse {
        total_results: result.matches.len(),
        requests: result.matches,
        max_distance_km: matcher.max_distance_km(),
    })
}

/// Post a logistics request
///
/// POST /api/v1/logistics
async fn create_logistics(
    state: web::Data<AppState>,
    req: web::Json<CreateLogisticsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    let req = req.into_inner();
    let payload = LogisticsPayload {
        direction: req.direction,
        goods: req.goods,
        quantity: req.quantity,
        destination: req.destination,
        date: req.date,
    };

    match state.backend.create_logistics_request(&payload, &token).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => backend_failed("Failed to create logistics request", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_health_check_response() {
        let resp = health_check().await.respond_to(&actix_web::test::TestRequest::default().to_http_request());
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
