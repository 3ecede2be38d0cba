//! End-to-end tests of the hospital collection endpoint through the axum router.

use api_rest::{router, AppState, HOSPITALS_PATH};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use hospital_core::{
    CoreConfig, FileStore, HospitalDraft, HospitalRecord, HospitalStore, MemoryStore,
    RecordStoreGateway, StoreBackend, StoreError,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::io;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn memory_app() -> Router {
    let gateway = RecordStoreGateway::new(Arc::new(MemoryStore::new()));
    router(AppState::new(gateway))
}

fn valid_payload(name: &str) -> Value {
    json!({
        "name": name,
        "size": "Medium",
        "location": "Norwich",
        "totalBeds": 1200,
        "operatingHours": {
            "from": "09:00",
            "to": "17:00",
            "days": ["Monday", "Tuesday", "Wednesday"]
        },
        "services": [
            { "name": "Cardiology", "description": "Heart and vascular care" }
        ]
    })
}

/// Store whose every operation fails with an I/O error.
struct FailingStore;

const STORE_FAULT: &str = "disk on fire";

impl HospitalStore for FailingStore {
    fn find_all(&self) -> Result<Vec<HospitalRecord>, StoreError> {
        Err(StoreError::FileRead(io::Error::other(STORE_FAULT)))
    }

    fn create(&self, _draft: &HospitalDraft) -> Result<HospitalRecord, StoreError> {
        Err(StoreError::FileWrite(io::Error::other(STORE_FAULT)))
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Files
    }
}

fn failing_app() -> Router {
    router(AppState::new(RecordStoreGateway::new(Arc::new(FailingStore))))
}

async fn send(
    app: &Router,
    method: Method,
    body: Option<Vec<u8>>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(HOSPITALS_PATH);
    let request = match body {
        Some(bytes) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

async fn post(app: &Router, payload: &Value) -> (StatusCode, Value) {
    let bytes = serde_json::to_vec(payload).unwrap();
    let (status, _, body) = send(app, Method::POST, Some(bytes)).await;
    (status, body)
}

#[tokio::test]
async fn get_on_empty_store_returns_empty_list() {
    let app = memory_app();
    let (status, _, body) = send(&app, Method::GET, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": [] }));
}

#[tokio::test]
async fn post_valid_payload_returns_created_record() {
    let app = memory_app();
    let payload = valid_payload("Norfolk and Norwich");
    let (status, body) = post(&app, &payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    for field in ["name", "size", "location", "totalBeds", "operatingHours", "services"] {
        assert_eq!(data[field], payload[field], "{field} should round-trip");
    }
    assert!(data["createdAt"].is_string());
    assert_eq!(data["createdAt"], data["updatedAt"]);
    assert_eq!(data["id"].as_str().unwrap().len(), 32);

    let (status, _, list) = send(&app, Method::GET, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0], *data);
}

#[tokio::test]
async fn invalid_fields_each_get_details() {
    let app = memory_app();
    let payload = json!({
        "name": "",
        "size": "Huge",
        "location": "Norwich",
        "totalBeds": 0,
        "operatingHours": { "from": "24:00", "to": "17:00", "days": [] },
        "services": []
    });
    let (status, body) = post(&app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Validation failed."));
    let details = body["details"].as_object().unwrap();
    for field in ["name", "size", "totalBeds", "operatingHours", "services"] {
        let messages = details[field].as_array().unwrap();
        assert!(!messages.is_empty(), "{field} should have messages");
    }
    assert!(!details.contains_key("location"));
}

#[tokio::test]
async fn missing_fields_are_reported() {
    let app = memory_app();
    let (status, body) = post(&app, &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_object().unwrap();
    for field in ["name", "size", "location", "totalBeds", "operatingHours", "services"] {
        assert!(details.contains_key(field), "{field} should be reported");
    }
}

#[tokio::test]
async fn time_boundaries() {
    let app = memory_app();

    let mut payload = valid_payload("Boundary A");
    payload["operatingHours"]["from"] = json!("24:00");
    assert_eq!(post(&app, &payload).await.0, StatusCode::BAD_REQUEST);

    payload["operatingHours"]["from"] = json!("09:60");
    assert_eq!(post(&app, &payload).await.0, StatusCode::BAD_REQUEST);

    payload["operatingHours"]["from"] = json!("09:00");
    assert_eq!(post(&app, &payload).await.0, StatusCode::CREATED);
}

#[tokio::test]
async fn size_enumeration() {
    let app = memory_app();

    let mut payload = valid_payload("Size Test");
    payload["size"] = json!("Huge");
    let (status, body) = post(&app, &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["size"].is_array());

    payload["size"] = json!("Small");
    assert_eq!(post(&app, &payload).await.0, StatusCode::CREATED);
}

#[tokio::test]
async fn empty_services_rejected() {
    let app = memory_app();
    let mut payload = valid_payload("No Services");
    payload["services"] = json!([]);
    let (status, body) = post(&app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!({ "services": ["At least one service is required."] })
    );
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = memory_app();
    let payload = valid_payload("James Paget");

    assert_eq!(post(&app, &payload).await.0, StatusCode::CREATED);

    let (status, body) = post(&app, &payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Conflict: A record with this name ('James Paget') already exists."
        })
    );
}

#[tokio::test]
async fn whitespace_name_fails_database_validation() {
    let app = memory_app();
    let (status, body) = post(&app, &valid_payload("   ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Database validation failed."));
    assert_eq!(body["details"]["name"], json!(["Hospital name is required."]));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = memory_app();
    let (status, _, body) = send(&app, Method::POST, Some(b"{ not json".to_vec())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Malformed JSON body."));
    assert!(body["details"]["body"].is_array());
}

#[tokio::test]
async fn unsupported_method_is_405_with_allow() {
    let app = memory_app();
    let (status, headers, body) = send(&app, Method::DELETE, None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers.get(header::ALLOW).unwrap(), "GET, POST");
    assert_eq!(
        body,
        json!({ "success": false, "error": "Method DELETE Not Allowed" })
    );
}

#[tokio::test]
async fn file_store_backs_the_same_contract() {
    let temp = TempDir::new().unwrap();
    let cfg = CoreConfig::new(StoreBackend::Files, temp.path().to_path_buf()).unwrap();
    let app = router(AppState::new(RecordStoreGateway::new(Arc::new(
        FileStore::open(&cfg).unwrap(),
    ))));

    assert_eq!(post(&app, &valid_payload("Cromer")).await.0, StatusCode::CREATED);
    assert_eq!(post(&app, &valid_payload("Cromer")).await.0, StatusCode::CONFLICT);

    let (status, _, body) = send(&app, Method::GET, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], json!("Cromer"));
}

#[tokio::test]
async fn store_fault_on_list_is_opaque_500() {
    let app = failing_app();
    let (status, _, body) = send(&app, Method::GET, None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Server error fetching hospitals." })
    );
    assert!(!body.to_string().contains(STORE_FAULT));
}

#[tokio::test]
async fn store_fault_on_create_is_opaque_500() {
    let app = failing_app();
    let (status, body) = post(&app, &valid_payload("Addenbrooke's")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Server error creating hospital." })
    );
    assert!(body.get("details").is_none());
    assert!(!body.to_string().contains(STORE_FAULT));
}

#[tokio::test]
async fn validation_is_checked_before_a_faulty_store() {
    let app = failing_app();
    let (status, body) = post(&app, &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Validation failed."));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = memory_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn openapi_describes_error_details_inline() {
    let app = memory_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();

    let details = &doc["components"]["schemas"]["ErrorRes"]["properties"]["details"];
    assert!(details.is_object());
    assert!(details.get("$ref").is_none());
}
