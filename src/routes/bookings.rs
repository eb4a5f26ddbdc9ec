use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::core::quote_rental;
use crate::models::{
    ApprovalAction, AvailabilityRequest, AvailabilityWindow, BookingAction, CreateBookingRequest,
    QuoteRequest, QuoteResponse, RatingRequest,
};
use crate::routes::{
    backend_failed, bearer_token, error_response, invalidate_catalogue, missing_token, validation_failed,
    AppState,
};
use crate::services::{BookingPayload, RatingPayload};

/// Configure booking, rating and approval routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/bookings/quote", web::post().to(quote))
        .route("/bookings", web::get().to(list_bookings))
        .route("/bookings", web::post().to(create_booking))
        .route("/bookings/{booking_id}/{action}", web::patch().to(update_booking_status))
        .route("/ratings", web::post().to(submit_rating))
        .route("/availability", web::get().to(list_availability))
        .route("/availability", web::post().to(save_availability))
        .route("/admin/approvals", web::get().to(pending_approvals))
        .route("/admin/equipment/{equipment_id}/{action}", web::post().to(update_equipment_status));
}

fn parse_booking_action(raw: &str) -> Option<BookingAction> {
    match raw.to_lowercase().as_str() {
        "accept" => Some(BookingAction::Accept),
        "reject" | "decline" => Some(BookingAction::Reject),
        _ => None,
    }
}

fn parse_approval_action(raw: &str) -> Option<ApprovalAction> {
    match raw.to_lowercase().as_str() {
        "approve" => Some(ApprovalAction::Approve),
        "reject" => Some(ApprovalAction::Reject),
        _ => None,
    }
}

/// Rental price quote
///
/// POST /api/v1/bookings/quote
///
/// Request body:
/// ```json
/// {
///   "dailyRate": 6400,
///   "start": "2026-11-01T00:00:00Z",
///   "end": "2026-11-03T00:00:00Z"
/// }
/// ```
async fn quote(req: web::Json<QuoteRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match quote_rental(req.daily_rate, req.start, req.end) {
        Some((days, total_price)) => HttpResponse::Ok().json(QuoteResponse { days, total_price }),
        None => error_response(
            StatusCode::BAD_REQUEST,
            "Invalid date range",
            "End date must not be before start date",
        ),
    }
}

/// The caller's bookings
///
/// GET /api/v1/bookings
async fn list_bookings(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.backend.fetch_bookings(&token).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(e) => backend_failed("Failed to fetch bookings", e),
    }
}

/// Create a booking request
///
/// POST /api/v1/bookings
async fn create_booking(
    state: web::Data<AppState>,
    req: web::Json<CreateBookingRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    if req.end < req.start {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid date range",
            "Please select a valid date range for your booking",
        );
    }

    let payload = BookingPayload {
        equipment_id: req.equipment_id.clone(),
        start_ts: req.start,
        end_ts: req.end,
    };

    match state.backend.create_booking(&payload, &token).await {
        Ok(booking) => {
            tracing::info!("Booking requested for equipment {}", req.equipment_id);
            HttpResponse::Created().json(booking)
        }
        Err(e) => backend_failed("Failed to create booking", e),
    }
}

/// Owner accepts or rejects a booking
///
/// PATCH /api/v1/bookings/{booking_id}/{accept|reject}
async fn update_booking_status(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    http_req: HttpRequest,
) -> impl Responder {
    let (booking_id, action) = path.into_inner();

    let action = match parse_booking_action(&action) {
        Some(action) => action,
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid action",
                "Action must be one of: accept, reject",
            )
        }
    };

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.backend.update_booking_status(&booking_id, action, &token).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => backend_failed(&format!("Failed to {} booking", action.as_str()), e),
    }
}

/// Rate a completed booking
///
/// POST /api/v1/ratings
async fn submit_rating(
    state: web::Data<AppState>,
    req: web::Json<RatingRequest>,
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
    let payload = RatingPayload {
        booking_id: req.booking_id,
        stars: req.stars,
        comment: req.comment,
    };

    match state.backend.submit_rating(&payload, &token).await {
        Ok(rating) => HttpResponse::Created().json(rating),
        Err(e) => backend_failed("Failed to submit review", e),
    }
}

/// Owner offers equipment for a date range
///
/// POST /api/v1/availability
async fn save_availability(
    state: web::Data<AppState>,
    req: web::Json<AvailabilityRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    if req.end_date < req.start_date {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid date range",
            "Please select a valid date range",
        );
    }

    let req = req.into_inner();
    let window = AvailabilityWindow {
        equipment_id: req.equipment_id,
        start_date: req.start_date,
        end_date: req.end_date,
    };

    match state.backend.save_availability(&window, &token).await {
        Ok(saved) => HttpResponse::Created().json(saved),
        Err(e) => backend_failed("Failed to save availability", e),
    }
}

/// Availability windows visible to the caller
///
/// GET /api/v1/availability
async fn list_availability(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.backend.fetch_availabilities(&token).await {
        Ok(windows) => HttpResponse::Ok().json(windows),
        Err(e) => backend_failed("Failed to fetch availabilities", e),
    }
}

/// Equipment waiting for admin review
///
/// GET /api/v1/admin/approvals
async fn pending_approvals(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.backend.fetch_pending_equipment(&token).await {
        Ok(pending) => {
            tracing::debug!("{} listings awaiting review", pending.len());
            HttpResponse::Ok().json(pending)
        }
        Err(e) => backend_failed("Failed to fetch approval queue", e),
    }
}

/// Admin approves or rejects an equipment listing
///
/// POST /api/v1/admin/equipment/{equipment_id}/{approve|reject}
///
/// The cached catalogue is invalidated so approvals show up immediately.
async fn update_equipment_status(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    http_req: HttpRequest,
) -> impl Responder {
    let (equipment_id, action) = path.into_inner();

    let action = match parse_approval_action(&action) {
        Some(action) => action,
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid action",
                "Action must be one of: approve, reject",
            )
        }
    };

    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.backend.update_equipment_status(&equipment_id, action, &token).await {
        Ok(body) => {
            invalidate_catalogue(&state).await;
            HttpResponse::Ok().json(body)
        }
        Err(e) => backend_failed(&format!("Failed to {} equipment", action.as_str()), e),
    }
}
