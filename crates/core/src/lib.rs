//! # Hospital Core
//!
//! Core business logic for hospital onboarding:
//! - The hospital data model ([`model`])
//! - Application-layer validation of untyped payloads ([`validation`])
//! - The independent persistence schema ([`schema`])
//! - Document stores with unique-name enforcement ([`store`])
//! - The Record Store Gateway tying them together ([`gateway`])
//!
//! **No API concerns**: HTTP routing, status codes, and response envelopes belong in
//! `api-rest`; wire types live in `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod field_errors;
pub mod gateway;
pub mod model;
pub mod schema;
pub mod store;
pub mod validation;

pub use config::{core_config_from_env_values, CoreConfig, StoreBackend};
pub use constants::DEFAULT_HOSPITAL_DATA_DIR;
pub use error::{HospitalError, HospitalResult};
pub use field_errors::FieldErrors;
pub use gateway::{GatewayError, GatewayResult, RecordStoreGateway};
pub use hospital_types::NonEmptyText;
pub use hospital_uuid::RecordId;
pub use model::{HospitalDraft, HospitalRecord, HospitalSize, Weekday};
pub use store::{open_store, FileStore, HospitalStore, MemoryStore, StoreError};
