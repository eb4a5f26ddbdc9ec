use crate::models::{
    ApprovalAction, AvailabilityWindow, Booking, BookingAction, Equipment, EquipmentType, LogisticsDirection,
    LogisticsRequest,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// HTTP status to report to our own callers
    pub fn status_code(&self) -> u16 {
        match self {
            BackendError::Unauthorized(_) => 401,
            BackendError::NotFound(_) => 404,
            BackendError::ApiError { status, .. } if (400..500).contains(status) => *status,
            _ => 502,
        }
    }
}

/// New equipment listing, in the backend's field names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentPayload {
    pub model: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    pub daily_rate: f64,
    pub operator_included: bool,
    pub image_url: String,
    pub lat: f64,
    pub lon: f64,
}

/// Partial equipment update; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<EquipmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_included: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// Booking creation payload, in the backend's field names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingPayload {
    pub equipment_id: String,
    pub start_ts: chrono::DateTime<chrono::Utc>,
    pub end_ts: chrono::DateTime<chrono::Utc>,
}

/// Rating payload, in the backend's field names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingPayload {
    pub booking_id: String,
    pub stars: u8,
    pub comment: String,
}

/// Logistics request payload, in the backend's field names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsPayload {
    #[serde(rename = "type")]
    pub direction: LogisticsDirection,
    pub goods: String,
    pub quantity: String,
    pub destination: String,
    pub date: String,
}

/// Marketplace backend API client
///
/// Every call forwards the caller's bearer token unchanged. Handles:
/// - Reading the approved equipment catalogue and the admin approval queue
/// - Listing, updating, approving and rejecting equipment
/// - Owner availability windows
/// - Booking listing, creation and owner accept / reject
/// - Ratings and logistics requests
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: RequestBuilder, token: &str, action: &str) -> Result<Response, BackendError> {
        let response = request.bearer_auth(token).send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_detail(&body).unwrap_or_else(|| format!("Failed to {}", action));

        tracing::warn!("Backend call to {} failed: {} - {}", action, status, message);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthorized(message),
            StatusCode::NOT_FOUND => BackendError::NotFound(message),
            _ => BackendError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Fetch all approved equipment (the public catalogue)
    pub async fn fetch_all_equipment(&self, token: &str) -> Result<Vec<Equipment>, BackendError> {
        let url = self.url("/api/equipment/");
        tracing::debug!("Fetching equipment catalogue from: {}", url);

        let response = self.send(self.client.get(&url), token, "fetch equipment").await?;
        let equipment: Vec<Equipment> = parse_json(response, "equipment").await?;

        tracing::debug!("Fetched {} equipment listings", equipment.len());
        Ok(equipment)
    }

    /// List a new piece of equipment; it starts in the review queue
    pub async fn create_equipment(&self, payload: &EquipmentPayload, token: &str) -> Result<Value, BackendError> {
        let url = self.url("/api/equipment/");
        let response = self
            .send(self.client.post(&url).json(payload), token, "submit equipment")
            .await?;
        parse_json(response, "created equipment").await
    }

    /// Owner edits an existing listing
    pub async fn update_equipment(
        &self,
        equipment_id: &str,
        update: &EquipmentUpdate,
        token: &str,
    ) -> Result<Value, BackendError> {
        let url = self.url(&format!("/api/equipment/{}", urlencoding::encode(equipment_id)));
        let response = self
            .send(self.client.patch(&url).json(update), token, "update equipment")
            .await?;
        parse_json(response, "updated equipment").await
    }

    /// Fetch equipment waiting for admin review
    pub async fn fetch_pending_equipment(&self, token: &str) -> Result<Vec<Equipment>, BackendError> {
        let url = self.url("/api/v1/admin/approvals");
        let response = self.send(self.client.get(&url), token, "fetch pending equipment").await?;
        parse_json(response, "pending equipment").await
    }

    /// Approve or reject an equipment listing
    pub async fn update_equipment_status(
        &self,
        equipment_id: &str,
        action: ApprovalAction,
        token: &str,
    ) -> Result<Value, BackendError> {
        let url = self.url(&format!(
            "/api/v1/admin/{}/{}",
            action.as_str(),
            urlencoding::encode(equipment_id)
        ));

        let response = self
            .send(self.client.post(&url), token, &format!("{} equipment", action.as_str()))
            .await?;

        tracing::info!("Equipment {} -> {}", equipment_id, action.as_str());
        optional_json(response).await
    }

    /// Create a booking request for a piece of equipment
    pub async fn create_booking(&self, payload: &BookingPayload, token: &str) -> Result<Value, BackendError> {
        let url = self.url("/api/v1/bookings/");
        let response = self
            .send(self.client.post(&url).json(payload), token, "create booking")
            .await?;
        parse_json(response, "booking").await
    }

    /// Fetch the caller's bookings
    pub async fn fetch_bookings(&self, token: &str) -> Result<Vec<Booking>, BackendError> {
        let url = self.url("/api/v1/booking");
        let response = self.send(self.client.get(&url), token, "fetch bookings").await?;
        parse_json(response, "bookings").await
    }

    /// Owner accepts or rejects a booking request
    pub async fn update_booking_status(
        &self,
        booking_id: &str,
        action: BookingAction,
        token: &str,
    ) -> Result<Value, BackendError> {
        let url = self.url(&format!(
            "/api/v1/bookings/{}/{}",
            urlencoding::encode(booking_id),
            action.as_str()
        ));

        let response = self
            .send(self.client.patch(&url), token, &format!("{} booking", action.as_str()))
            .await?;
        optional_json(response).await
    }

    /// Submit a rating for a completed booking
    pub async fn submit_rating(&self, payload: &RatingPayload, token: &str) -> Result<Value, BackendError> {
        let url = self.url("/api/ratings/");
        let response = self
            .send(self.client.post(&url).json(payload), token, "submit review")
            .await?;
        parse_json(response, "rating").await
    }

    /// Record a window in which a piece of equipment can be rented
    pub async fn save_availability(&self, window: &AvailabilityWindow, token: &str) -> Result<Value, BackendError> {
        let url = self.url("/api/v1/availability/");
        let response = self
            .send(self.client.post(&url).json(window), token, "save availability")
            .await?;
        parse_json(response, "availability").await
    }

    /// Availability windows visible to the caller
    pub async fn fetch_availabilities(&self, token: &str) -> Result<Vec<AvailabilityWindow>, BackendError> {
        let url = self.url("/api/v1/availabilities");
        let response = self.send(self.client.get(&url), token, "fetch availabilities").await?;
        parse_json(response, "availabilities").await
    }

    /// Fetch open logistics requests
    pub async fn fetch_logistics_requests(&self, token: &str) -> Result<Vec<LogisticsRequest>, BackendError> {
        let url = self.url("/api/v1/logistics/");
        let response = self.send(self.client.get(&url), token, "fetch logistics requests").await?;
        parse_json(response, "logistics requests").await
    }

    /// Post a new logistics request
    pub async fn create_logistics_request(
        &self,
        payload: &LogisticsPayload,
        token: &str,
    ) -> Result<Value, BackendError> {
        let url = self.url("/api/v1/logistics/");
        let response = self
            .send(self.client.post(&url).json(payload), token, "create logistics request")
            .await?;
        parse_json(response, "logistics request").await
    }
}

/// Extract the `detail` message from a backend error body
fn error_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

async fn parse_json<T>(response: Response, what: &str) -> Result<T, BackendError>
where
    T: for<'de> Deserialize<'de>,
{
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
}

// Some endpoints answer with an empty body
async fn optional_json(response: Response) -> Result<Value, BackendError> {
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquipmentType;

    const EQUIPMENT_JSON: &str = r#"[
        {"id": "eq-1", "owner_id": "user-1", "type": "TRACTOR", "brand": "Mahindra",
         "model": "JIVO 365 DI", "daily_rate": 6400, "lat": 30.901, "lon": 75.8573,
         "status": "APPROVED"},
        {"id": "eq-2", "owner_id": "user-2", "type": "HARVESTER", "brand": "Shaktiman",
         "model": "Paddy Master", "daily_rate": 12000, "lat": 29.6857, "lon": 76.9905,
         "status": "APPROVED"}
    ]"#;

    #[test]
    fn test_backend_client_creation() {
        let client = BackendClient::new("http://127.0.0.1:8000/".to_string(), 30).unwrap();

        assert_eq!(client.base_url(), "http://127.0.0.1:8000/");
        assert_eq!(client.url("/api/equipment/"), "http://127.0.0.1:8000/api/equipment/");
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail": "Equipment not found"}"#), Some("Equipment not found".to_string()));
        assert_eq!(error_detail("<html>oops</html>"), None);
        assert_eq!(error_detail(r#"{"error": "x"}"#), None);
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(BackendError::Unauthorized("x".into()).status_code(), 401);
        assert_eq!(BackendError::NotFound("x".into()).status_code(), 404);
        assert_eq!(BackendError::ApiError { status: 422, message: "x".into() }.status_code(), 422);
        assert_eq!(BackendError::ApiError { status: 500, message: "x".into() }.status_code(), 502);
    }

    #[tokio::test]
    async fn test_fetch_all_equipment_forwards_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/equipment/")
            .match_header("authorization", "Bearer farmer-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EQUIPMENT_JSON)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let equipment = client.fetch_all_equipment("farmer-token").await.unwrap();

        mock.assert_async().await;
        assert_eq!(equipment.len(), 2);
        assert_eq!(equipment[1].equipment_type, EquipmentType::Harvester);
    }

    #[tokio::test]
    async fn test_backend_detail_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v1/bookings/")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Equipment already booked for these dates"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let payload = BookingPayload {
            equipment_id: "eq-1".to_string(),
            start_ts: chrono::Utc::now(),
            end_ts: chrono::Utc::now(),
        };

        let err = client.create_booking(&payload, "tok").await.unwrap_err();
        match err {
            BackendError::ApiError { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Equipment already booked for these dates");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_uses_fallback_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/admin/approvals")
            .with_status(401)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let err = client.fetch_pending_equipment("expired").await.unwrap_err();

        assert!(matches!(err, BackendError::Unauthorized(ref m) if m == "Failed to fetch pending equipment"));
    }

    #[tokio::test]
    async fn test_booking_status_update_without_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/v1/bookings/bk-7/accept")
            .match_header("authorization", "Bearer owner-token")
            .with_status(204)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let value = client
            .update_booking_status("bk-7", BookingAction::Accept, "owner-token")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_create_equipment_posts_backend_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/equipment/")
            .match_header("authorization", "Bearer owner-token")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "type": "ROTAVATOR",
                "brand": "Shaktiman",
                "daily_rate": 2500.0,
                "operator_included": false,
                "lat": 31.224,
                "lon": 75.774
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "eq-42", "status": "PENDING_REVIEW"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let payload = EquipmentPayload {
            model: "Regular Light".to_string(),
            brand: "Shaktiman".to_string(),
            equipment_type: EquipmentType::Rotavator,
            description: None,
            hourly_rate: None,
            daily_rate: 2500.0,
            operator_included: false,
            image_url: String::new(),
            lat: 31.224,
            lon: 75.774,
        };

        let created = client.create_equipment(&payload, "owner-token").await.unwrap();

        mock.assert_async().await;
        assert_eq!(created["id"], "eq-42");
    }

    #[tokio::test]
    async fn test_update_equipment_sends_only_set_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/equipment/eq-1")
            .match_body(mockito::Matcher::Json(serde_json::json!({"daily_rate": 7000.0})))
            .with_status(200)
            .with_body(r#"{"id": "eq-1", "daily_rate": 7000.0}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let update = EquipmentUpdate {
            daily_rate: Some(7000.0),
            ..Default::default()
        };

        let updated = client.update_equipment("eq-1", &update, "owner-token").await.unwrap();

        mock.assert_async().await;
        assert_eq!(updated["daily_rate"], 7000.0);
    }

    #[tokio::test]
    async fn test_availability_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let save = server
            .mock("POST", "/api/v1/availability/")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "equipment_id": "eq-1",
                "start_date": "2026-11-01",
                "end_date": "2026-11-15"
            })))
            .with_status(201)
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/api/v1/availabilities")
            .with_status(200)
            .with_body(r#"[{"equipment_id": "eq-1", "start_date": "2026-11-01", "end_date": "2026-11-15"}]"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let window = AvailabilityWindow {
            equipment_id: "eq-1".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 11, 15).unwrap(),
        };

        client.save_availability(&window, "owner-token").await.unwrap();
        let windows = client.fetch_availabilities("owner-token").await.unwrap();

        save.assert_async().await;
        list.assert_async().await;
        assert_eq!(windows, vec![window]);
    }

    #[tokio::test]
    async fn test_fetch_bookings() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/booking")
            .with_status(200)
            .with_body(
                r#"[{"id": "bk-1", "equipment_id": "eq-1", "user_id": "user-2", "owner_id": "user-1",
                     "start_ts": "2026-11-01T00:00:00Z", "end_ts": "2026-11-03T00:00:00Z",
                     "status": "Pending", "total_price": 19200}]"#,
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let bookings = client.fetch_bookings("farmer-token").await.unwrap();

        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].status, crate::models::BookingStatus::Pending);
        assert_eq!(bookings[0].total_price, 19200.0);
    }

    #[tokio::test]
    async fn test_invalid_catalogue_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/equipment/")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), 5).unwrap();
        let err = client.fetch_all_equipment("tok").await.unwrap_err();

        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }
}
