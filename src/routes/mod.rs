// Route exports
pub mod bookings;
pub mod listings;

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use validator::ValidationErrors;

use crate::core::{ListingMatcher, Paginator};
use crate::models::{Equipment, ErrorResponse};
use crate::services::{BackendClient, BackendError, CacheKey, CacheManager};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: ListingMatcher,
    pub paginator: Paginator,
    pub max_page_size: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(listings::configure)
            .configure(bookings::configure),
    );
}

/// JSON extractor config that answers malformed bodies with an `ErrorResponse`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::info!("Rejected JSON body on {}: {}", req.path(), err);
        let response = error_response(StatusCode::BAD_REQUEST, "Invalid JSON", &err);
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Extract the caller's bearer token from the Authorization header
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(actix_web::http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").or_else(|| value.strip_prefix("bearer "))?;
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn missing_token() -> HttpResponse {
    error_response(
        StatusCode::UNAUTHORIZED,
        "Missing bearer token",
        "Authorization: Bearer <token> header is required",
    )
}

pub(crate) fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors)
}

pub(crate) fn backend_failed(context: &str, err: BackendError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    error_response(status, context, err)
}

/// Approved equipment catalogue, served from cache when possible
pub(crate) async fn load_catalogue(state: &AppState, token: &str) -> Result<Vec<Equipment>, BackendError> {
    let key = CacheKey::catalogue();

    match state.cache.get::<Vec<Equipment>>(&key).await {
        Ok(Some(catalogue)) => {
            tracing::debug!("Serving {} listings from cached catalogue", catalogue.len());
            return Ok(catalogue);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Catalogue cache read failed: {}", e),
    }

    let catalogue = state.backend.fetch_all_equipment(token).await?;

    if let Err(e) = state.cache.put(&key, &catalogue).await {
        tracing::warn!("Failed to cache equipment catalogue: {}", e);
    }

    Ok(catalogue)
}

/// Drop the cached catalogue after a listing changes
pub(crate) async fn invalidate_catalogue(state: &AppState) {
    if let Err(e) = state.cache.invalidate(&CacheKey::catalogue()).await {
        tracing::warn!("Failed to invalidate catalogue cache: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_extraction() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def".to_string()));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcg=="))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer   "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
