//! Document stores for hospital records.
//!
//! A store is the persistence layer behind the Record Store Gateway. Every store:
//!
//! - runs the persistence schema ([`crate::schema::check_document`]) on each document
//!   before writing it, independently of the Validator;
//! - enforces uniqueness of the (trimmed) hospital `name`, serialising concurrent
//!   creators of the same name so exactly one succeeds;
//! - assigns the record id and the `createdAt` / `updatedAt` timestamps.
//!
//! Stores are constructed once at startup via [`open_store`] and shared as
//! `Arc<dyn HospitalStore>`.

mod files;
mod memory;

pub use files::FileStore;
pub use memory::MemoryStore;

use crate::config::{CoreConfig, StoreBackend};
use crate::field_errors::FieldErrors;
use crate::model::{HospitalDocument, HospitalDraft, HospitalRecord};
use crate::schema;
use crate::HospitalResult;
use std::path::PathBuf;
use std::sync::Arc;

/// Field carrying the unique constraint.
pub const UNIQUE_FIELD: &str = "name";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document failed schema validation: {0}")]
    SchemaViolation(FieldErrors),
    #[error("duplicate key: {field} '{value}' already exists")]
    DuplicateKey { field: String, value: String },
    #[error("failed to serialize hospital document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize hospital document {path}: {source}", path = path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create hospital directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to write hospital document: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read hospital document: {0}")]
    FileRead(std::io::Error),
    #[error("failed to update name index: {0}")]
    IndexWrite(std::io::Error),
    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence primitives required by the gateway.
pub trait HospitalStore: Send + Sync {
    /// Returns every stored record, oldest first.
    fn find_all(&self) -> StoreResult<Vec<HospitalRecord>>;

    /// Validates `draft` against the persistence schema, enforces name uniqueness and
    /// stores it, returning the stored record with its id and timestamps.
    fn create(&self, draft: &HospitalDraft) -> StoreResult<HospitalRecord>;

    /// Which backend this is, for logging.
    fn backend(&self) -> StoreBackend;
}

/// Constructs the store selected by `cfg`.
///
/// # Errors
///
/// Returns `HospitalError` if the file store's data directory cannot be prepared.
pub fn open_store(cfg: &CoreConfig) -> HospitalResult<Arc<dyn HospitalStore>> {
    let store: Arc<dyn HospitalStore> = match cfg.backend() {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Files => Arc::new(FileStore::open(cfg)?),
    };
    tracing::info!(backend = %store.backend(), "hospital store opened");
    Ok(store)
}

/// Serialises a draft into the document the store will persist and runs the
/// persistence schema over it.
fn prepare_document(draft: &HospitalDraft) -> StoreResult<HospitalDocument> {
    let raw = serde_json::to_value(draft).map_err(StoreError::Serialization)?;
    schema::check_document(&raw).map_err(StoreError::SchemaViolation)
}

fn duplicate_name(document: &HospitalDocument) -> StoreError {
    StoreError::DuplicateKey {
        field: UNIQUE_FIELD.to_string(),
        value: document.name.to_string(),
    }
}
