//! Record Store Gateway.
//!
//! The request-level entry point for hospital records. It owns no state between calls
//! beyond the store handle it was built with:
//!
//! - [`RecordStoreGateway::list`] returns every stored record.
//! - [`RecordStoreGateway::create`] runs the Validator on an untyped payload, then hands
//!   the draft to the store, which applies its own schema check and the unique-name
//!   constraint.
//!
//! Every failure is mapped to one [`GatewayError`] variant; nothing is retried.

use crate::field_errors::FieldErrors;
use crate::model::HospitalRecord;
use crate::store::{HospitalStore, StoreError};
use crate::validation::validate_hospital_payload;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Rejected by the Validator; the store was not touched.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// Rejected by the persistence schema.
    #[error("database validation failed: {0}")]
    Schema(FieldErrors),
    /// A record with the same unique key already exists.
    #[error("conflict: a record with this {field} ('{value}') already exists")]
    Conflict { field: String, value: String },
    /// Store fault while listing.
    #[error("failed to list hospitals: {0}")]
    List(#[source] StoreError),
    /// Store fault while creating, other than schema or uniqueness.
    #[error("failed to create hospital: {0}")]
    Create(#[source] StoreError),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Validates and persists hospital records through an explicit store handle.
#[derive(Clone)]
pub struct RecordStoreGateway {
    store: Arc<dyn HospitalStore>,
}

impl RecordStoreGateway {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        Self { store }
    }

    /// Lists every stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::List`] on any store fault. No partial result is returned.
    pub fn list(&self) -> GatewayResult<Vec<HospitalRecord>> {
        self.store.find_all().map_err(GatewayError::List)
    }

    /// Validates `payload` and stores it.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Validation`] if the Validator rejects the payload.
    /// - [`GatewayError::Schema`] if the persistence schema rejects the document.
    /// - [`GatewayError::Conflict`] if the name is already taken.
    /// - [`GatewayError::Create`] for any other store fault.
    pub fn create(&self, payload: &Value) -> GatewayResult<HospitalRecord> {
        let draft = validate_hospital_payload(payload).map_err(GatewayError::Validation)?;

        match self.store.create(&draft) {
            Ok(record) => {
                tracing::info!(id = %record.id, name = %record.name, "hospital registered");
                Ok(record)
            }
            Err(StoreError::SchemaViolation(errors)) => {
                tracing::warn!("document passed validation but failed schema: {}", errors);
                Err(GatewayError::Schema(errors))
            }
            Err(StoreError::DuplicateKey { field, value }) => {
                Err(GatewayError::Conflict { field, value })
            }
            Err(e) => Err(GatewayError::Create(e)),
        }
    }
}

impl std::fmt::Debug for RecordStoreGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStoreGateway")
            .field("backend", &self.store.backend())
            .finish()
    }
}
