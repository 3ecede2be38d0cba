use super::{duplicate_name, prepare_document, HospitalStore, StoreError, StoreResult};
use crate::config::StoreBackend;
use crate::model::{HospitalDraft, HospitalRecord};
use chrono::Utc;
use hospital_uuid::RecordId;
use std::sync::RwLock;

/// Process-local store. Contents are lost when the process exits.
///
/// The uniqueness check and the insert happen under one write lock, so concurrent
/// creators of the same name are serialised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<HospitalRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HospitalStore for MemoryStore {
    fn find_all(&self) -> StoreResult<Vec<HospitalRecord>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn create(&self, draft: &HospitalDraft) -> StoreResult<HospitalRecord> {
        let document = prepare_document(draft)?;

        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        if records.iter().any(|r| r.name == document.name) {
            return Err(duplicate_name(&document));
        }

        let record = HospitalRecord::from_document(RecordId::new(), document, Utc::now());
        records.push(record.clone());
        tracing::debug!(id = %record.id, name = %record.name, "hospital stored in memory");
        Ok(record)
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::draft;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn empty_store_lists_nothing() {
        let store = MemoryStore::new();
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn create_assigns_id_and_equal_timestamps() {
        let store = MemoryStore::new();
        let record = store.create(&draft("Southmead")).unwrap();
        assert_eq!(record.name.as_str(), "Southmead");
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(store.find_all().unwrap(), vec![record]);
    }

    #[test]
    fn duplicate_name_after_trim_is_rejected() {
        let store = MemoryStore::new();
        store.create(&draft("Southmead")).unwrap();

        let err = store.create(&draft("  Southmead ")).unwrap_err();
        match err {
            StoreError::DuplicateKey { field, value } => {
                assert_eq!(field, "name");
                assert_eq!(value, "Southmead");
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let store = MemoryStore::new();
        store.create(&draft("Southmead")).unwrap();
        assert!(store.create(&draft("southmead")).is_ok());
    }

    #[test]
    fn schema_violation_does_not_store() {
        let store = MemoryStore::new();
        let err = store.create(&draft("   ")).unwrap_err();
        assert!(
            matches!(err, StoreError::SchemaViolation(errors) if errors.contains_field("name"))
        );
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn concurrent_same_name_admits_exactly_one() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.create(&draft("Frenchay")).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.find_all().unwrap().len(), 1);
    }
}
