use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{
    BookingRequest, CalcRequest, CalcResult, CreatedResponse, FaqEntry, InquiryRequest,
    PackageEntry, RepositoryError, ServiceEntry, ServiceError,
};
use crate::services::{CatalogService, IntakeService, PricingService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct ApiState {
    pub catalog_service: Arc<CatalogService>,
    pub pricing_service: Arc<PricingService>,
    pub intake_service: Arc<IntakeService>,
}

impl ApiState {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        pricing_service: Arc<PricingService>,
        intake_service: Arc<IntakeService>,
    ) -> Self {
        Self {
            catalog_service,
            pricing_service,
            intake_service,
        }
    }
}

pub type ApiError = (StatusCode, Json<Value>);

/// Create API router with all endpoints
pub fn create_api_router(state: ApiState) -> Router {
    Router::new()
        // Catalog (read-with-fallback)
        .route("/api/services", get(list_services))
        .route("/api/packages", get(list_packages))
        .route("/api/faqs", get(list_faqs))
        // Price calculator
        .route("/api/calc", post(calculate_price))
        // Intake
        .route("/api/book", post(create_booking))
        .route("/api/contact", post(create_inquiry))
        .with_state(state)
}

// =============================================================================
// CATALOG ENDPOINTS
// =============================================================================

#[instrument(name = "list_services", skip(state))]
pub async fn list_services(State(state): State<ApiState>) -> Json<Vec<ServiceEntry>> {
    let services = state.catalog_service.resolve_services().await;
    info!("Returning {} services", services.len());
    Json(services)
}

#[instrument(name = "list_packages", skip(state))]
pub async fn list_packages(State(state): State<ApiState>) -> Json<Vec<PackageEntry>> {
    let packages = state.catalog_service.resolve_packages().await;
    info!("Returning {} packages", packages.len());
    Json(packages)
}

#[instrument(name = "list_faqs", skip(state))]
pub async fn list_faqs(State(state): State<ApiState>) -> Json<Vec<FaqEntry>> {
    Json(state.catalog_service.resolve_faqs().await)
}

// =============================================================================
// PRICE CALCULATOR
// =============================================================================

#[instrument(name = "calculate_price", skip(state, request), fields(
    codes = request.selected_codes.len(),
    sessions = request.sessions,
))]
pub async fn calculate_price(
    State(state): State<ApiState>,
    Json(request): Json<CalcRequest>,
) -> Json<CalcResult> {
    Json(state.pricing_service.calculate(&request).await)
}

// =============================================================================
// INTAKE ENDPOINTS
// =============================================================================

#[instrument(name = "create_booking", skip(state, request))]
pub async fn create_booking(
    State(state): State<ApiState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    match state.intake_service.create_booking(request).await {
        Ok(id) => {
            info!("Booking created with ID: {}", id);
            Ok(Json(CreatedResponse::new(id)))
        }
        Err(err) => {
            error!("Failed to create booking: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

#[instrument(name = "create_inquiry", skip(state, request))]
pub async fn create_inquiry(
    State(state): State<ApiState>,
    Json(request): Json<InquiryRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    match state.intake_service.create_inquiry(request).await {
        Ok(id) => {
            info!("Inquiry created with ID: {}", id);
            Ok(Json(CreatedResponse::new(id)))
        }
        Err(err) => {
            error!("Failed to create inquiry: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Convert service errors to HTTP responses. The message is returned as `detail`.
pub fn service_error_to_response(err: ServiceError) -> ApiError {
    let status = match &err {
        ServiceError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository {
            source: RepositoryError::InvalidDocument { .. },
        } => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(json!({
            "detail": err.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
