//! # API REST
//!
//! REST API for hospital onboarding.
//!
//! Handles:
//! - HTTP endpoints with axum (`/api/hospitals`, `/health`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelopes, status codes, CORS, request tracing)
//!
//! Business rules live in `hospital-core`; this crate only routes and translates.

#![warn(rust_2018_idioms)]

pub mod error;

use api_shared::{
    CreateHospitalReq, CreateHospitalRes, ErrorRes, HealthRes, HealthService, Hospital,
    ListHospitalsRes, OperatingHours, Service,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use hospital_core::{HospitalRecord, RecordStoreGateway};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::{ApiError, ALLOWED_METHODS};

/// Path of the hospital collection resource.
pub const HOSPITALS_PATH: &str = "/api/hospitals";

/// Application state for the REST API server
///
/// Holds the gateway, whose store handle is built once at startup and shared by every
/// request.
#[derive(Clone, Debug)]
pub struct AppState {
    gateway: RecordStoreGateway,
}

impl AppState {
    pub fn new(gateway: RecordStoreGateway) -> Self {
        Self { gateway }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_hospitals, create_hospital),
    components(schemas(
        HealthRes,
        CreateHospitalReq,
        CreateHospitalRes,
        ListHospitalsRes,
        ErrorRes,
        Hospital,
        OperatingHours,
        Service,
    ))
)]
pub struct ApiDoc;

/// Builds the application router.
///
/// Methods other than `GET` and `POST` on the hospital collection get a JSON 405 with
/// `Allow: GET, POST`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            HOSPITALS_PATH,
            get(list_hospitals)
                .post(create_hospital)
                .fallback(method_not_allowed),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses(
        (status = 200, description = "All registered hospitals", body = ListHospitalsRes),
        (status = 500, description = "Store fault", body = ErrorRes)
    )
)]
/// List all registered hospitals
///
/// An empty store yields `200` with an empty `data` array.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store cannot be read.
#[axum::debug_handler]
async fn list_hospitals(
    State(state): State<AppState>,
) -> Result<Json<ListHospitalsRes>, ApiError> {
    let records = state.gateway.list()?;
    Ok(Json(ListHospitalsRes {
        success: true,
        data: records.iter().map(HospitalRecord::to_wire).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/hospitals",
    request_body = CreateHospitalReq,
    responses(
        (status = 201, description = "Hospital registered", body = CreateHospitalRes),
        (
            status = 400,
            description = "Validation or schema failure, with per-field details",
            body = ErrorRes
        ),
        (status = 409, description = "A hospital with this name already exists", body = ErrorRes),
        (status = 500, description = "Store fault", body = ErrorRes)
    )
)]
/// Register a new hospital
///
/// The body is parsed as untyped JSON and handed to the gateway, which validates it,
/// then stores it subject to the persistence schema and the unique-name constraint.
///
/// # Errors
/// - `400 Bad Request` if the body is not JSON, or either validation layer rejects it.
/// - `409 Conflict` if the name is already registered.
/// - `500 Internal Server Error` for any other store fault.
#[axum::debug_handler]
async fn create_hospital(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateHospitalRes>), ApiError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    let record = state.gateway.create(&payload)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateHospitalRes {
            success: true,
            data: record.to_wire(),
        }),
    ))
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
