//! File-backed document store.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   hospitals/
//!     <s1>/<s2>/<id>/hospital.json    # one document per record
//!   names/
//!     <sha256(name)>                  # unique-name index, contains the owning id
//! ```
//!
//! A name is claimed by creating its index entry with exclusive-create, so the
//! filesystem decides which of two concurrent creators wins. Documents are written to a
//! temporary file and renamed into place, so a reader never sees a partial document.
//!
//! An index entry whose owner has no document is either a create in flight (possibly
//! in another process sharing the directory) or the leftover of an interrupted one.
//! The two are told apart by age: only an entry untouched for [`STALE_CLAIM_AFTER`]
//! is reclaimed, and only by a creator that wants the same name.

use super::{duplicate_name, prepare_document, HospitalStore, StoreError, StoreResult};
use crate::config::{CoreConfig, StoreBackend};
use crate::constants::HOSPITAL_JSON_FILENAME;
use crate::model::{HospitalDocument, HospitalDraft, HospitalRecord};
use crate::{HospitalError, HospitalResult};
use chrono::Utc;
use hospital_types::NonEmptyText;
use hospital_uuid::RecordId;
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAX_ID_ATTEMPTS: usize = 5;

/// Age after which an index entry without a document is treated as abandoned.
pub const STALE_CLAIM_AFTER: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct FileStore {
    hospitals_dir: PathBuf,
    name_index_dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) the store under `cfg.data_dir()`.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError` if the data directory exists but is not a directory, or
    /// if the store directories cannot be created.
    pub fn open(cfg: &CoreConfig) -> HospitalResult<Self> {
        let data_dir = cfg.data_dir();
        if data_dir.exists() && !data_dir.is_dir() {
            return Err(HospitalError::DataDirNotDirectory(data_dir.to_path_buf()));
        }

        let store = Self {
            hospitals_dir: cfg.hospitals_dir(),
            name_index_dir: cfg.name_index_dir(),
        };
        for dir in [&store.hospitals_dir, &store.name_index_dir] {
            fs::create_dir_all(dir).map_err(|source| HospitalError::DataDirCreation {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(store)
    }

    fn name_index_path(&self, name: &NonEmptyText) -> PathBuf {
        let digest = Sha256::digest(name.as_str().as_bytes());
        self.name_index_dir.join(hex::encode(digest))
    }

    fn document_path(&self, id: &RecordId) -> PathBuf {
        id.sharded_dir(&self.hospitals_dir)
            .join(HOSPITAL_JSON_FILENAME)
    }

    /// Claims `document.name` in the index, returning the open index file.
    ///
    /// An existing entry is a duplicate unless [`Self::is_stale_claim`] says it was
    /// abandoned, in which case it is removed and the claim retried once.
    fn claim_name(&self, document: &HospitalDocument) -> StoreResult<(PathBuf, fs::File)> {
        let index_path = self.name_index_path(&document.name);
        for _attempt in 0..2 {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&index_path)
            {
                Ok(file) => return Ok((index_path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if !self.is_stale_claim(&index_path) {
                        return Err(duplicate_name(document));
                    }
                    tracing::warn!(
                        "reclaiming stale name index entry {}",
                        index_path.display()
                    );
                    match fs::remove_file(&index_path) {
                        Ok(()) => {}
                        Err(e) if e.kind() == ErrorKind::NotFound => {}
                        Err(e) => return Err(StoreError::IndexWrite(e)),
                    }
                }
                Err(e) => return Err(StoreError::IndexWrite(e)),
            }
        }
        Err(duplicate_name(document))
    }

    /// An entry is stale when its owner has no document and the entry has not been
    /// modified for [`STALE_CLAIM_AFTER`]. A vanished entry counts as stale.
    fn is_stale_claim(&self, index_path: &Path) -> bool {
        let owner = fs::read_to_string(index_path)
            .ok()
            .and_then(|s| RecordId::parse(s.trim()).ok());
        if owner.is_some_and(|id| self.document_path(&id).is_file()) {
            return false;
        }

        match fs::metadata(index_path).and_then(|m| m.modified()) {
            Ok(modified) => modified.elapsed().is_ok_and(|age| age >= STALE_CLAIM_AFTER),
            Err(e) => e.kind() == ErrorKind::NotFound,
        }
    }

    fn write_record(
        &self,
        document: HospitalDocument,
        index_file: &mut fs::File,
    ) -> StoreResult<HospitalRecord> {
        let (id, record_dir) = create_unique_record_dir(&self.hospitals_dir, RecordId::new)?;

        // The index entry names its owner before the document appears.
        index_file
            .write_all(id.to_string().as_bytes())
            .and_then(|()| index_file.sync_all())
            .map_err(StoreError::IndexWrite)?;

        let record = HospitalRecord::from_document(id, document, Utc::now());
        let result = serde_json::to_vec_pretty(&record)
            .map_err(StoreError::Serialization)
            .and_then(|bytes| write_atomically(&record_dir, &bytes));

        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_dir_all(&record_dir) {
                tracing::warn!(
                    "failed to remove partial record directory {}: {}",
                    record_dir.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        Ok(record)
    }
}

impl HospitalStore for FileStore {
    /// Walks the sharded tree. Directories without a document (a create in progress)
    /// are skipped; unreadable or corrupt documents fail the whole listing.
    fn find_all(&self) -> StoreResult<Vec<HospitalRecord>> {
        let mut records = Vec::new();

        for s1 in read_subdirs(&self.hospitals_dir)? {
            for s2 in read_subdirs(&s1)? {
                for record_dir in read_subdirs(&s2)? {
                    let path = record_dir.join(HOSPITAL_JSON_FILENAME);
                    let contents = match fs::read(&path) {
                        Ok(contents) => contents,
                        Err(e) if e.kind() == ErrorKind::NotFound => {
                            tracing::debug!("skipping {} (no document)", record_dir.display());
                            continue;
                        }
                        Err(e) => return Err(StoreError::FileRead(e)),
                    };
                    let record = serde_json::from_slice::<HospitalRecord>(&contents)
                        .map_err(|source| StoreError::Deserialization { path, source })?;
                    records.push(record);
                }
            }
        }

        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    fn create(&self, draft: &HospitalDraft) -> StoreResult<HospitalRecord> {
        let document = prepare_document(draft)?;
        let (index_path, mut index_file) = self.claim_name(&document)?;

        match self.write_record(document, &mut index_file) {
            Ok(record) => {
                tracing::debug!(id = %record.id, name = %record.name, "hospital document written");
                Ok(record)
            }
            Err(e) => {
                drop(index_file);
                if let Err(cleanup) = fs::remove_file(&index_path) {
                    tracing::warn!(
                        "failed to release name index entry {}: {}",
                        index_path.display(),
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Files
    }
}

/// Allocates a fresh record id and creates its sharded directory.
///
/// Retries with a new id if the directory already exists, up to `MAX_ID_ATTEMPTS`.
fn create_unique_record_dir(
    base_dir: &Path,
    mut id_source: impl FnMut() -> RecordId,
) -> StoreResult<(RecordId, PathBuf)> {
    for _attempt in 0..MAX_ID_ATTEMPTS {
        let id = id_source();
        let candidate = id.sharded_dir(base_dir);

        if candidate.exists() {
            continue;
        }

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent).map_err(StoreError::DirCreation)?;
        }

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((id, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(StoreError::DirCreation(e)),
        }
    }

    Err(StoreError::DirCreation(io::Error::new(
        ErrorKind::AlreadyExists,
        format!("failed to allocate a unique record directory after {MAX_ID_ATTEMPTS} attempts"),
    )))
}

fn write_atomically(record_dir: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = record_dir.join(format!("{HOSPITAL_JSON_FILENAME}.tmp"));
    let target = record_dir.join(HOSPITAL_JSON_FILENAME);

    let mut file = fs::File::create(&tmp).map_err(StoreError::FileWrite)?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(StoreError::FileWrite)?;
    fs::rename(&tmp, &target).map_err(StoreError::FileWrite)
}

fn read_subdirs(dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::FileRead(e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(StoreError::FileRead)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}
