//! Translation of request failures into HTTP responses.

use api_shared::ErrorRes;
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use hospital_core::validation::BODY_FIELD;
use hospital_core::GatewayError;
use std::collections::BTreeMap;

/// Methods served by the hospital collection, as advertised in `Allow`.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Every way a hospital request can fail at the HTTP boundary.
#[derive(Debug)]
pub enum ApiError {
    Gateway(GatewayError),
    /// The request body was not JSON.
    MalformedBody(String),
    MethodNotAllowed(Method),
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        ApiError::Gateway(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Gateway(GatewayError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorRes::with_details("Validation failed.", errors.into_map())),
            )
                .into_response(),
            ApiError::Gateway(GatewayError::Schema(errors)) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorRes::with_details(
                    "Database validation failed.",
                    errors.into_map(),
                )),
            )
                .into_response(),
            ApiError::Gateway(GatewayError::Conflict { field, value }) => (
                StatusCode::CONFLICT,
                Json(ErrorRes::new(format!(
                    "Conflict: A record with this {field} ('{value}') already exists."
                ))),
            )
                .into_response(),
            ApiError::Gateway(GatewayError::List(e)) => {
                tracing::error!("List hospitals error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorRes::new("Server error fetching hospitals.")),
                )
                    .into_response()
            }
            ApiError::Gateway(GatewayError::Create(e)) => {
                tracing::error!("Create hospital error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorRes::new("Server error creating hospital.")),
                )
                    .into_response()
            }
            ApiError::MalformedBody(message) => {
                let details = BTreeMap::from([(BODY_FIELD.to_string(), vec![message])]);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorRes::with_details("Malformed JSON body.", details)),
                )
                    .into_response()
            }
            ApiError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, ALLOWED_METHODS)],
                Json(ErrorRes::new(format!("Method {method} Not Allowed"))),
            )
                .into_response(),
        }
    }
}
