//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup (binaries read the environment and
//! hand the raw values to the helpers here) and then passed into core services. Nothing
//! in the core reads process-wide environment variables while handling a request.

use crate::constants::{DEFAULT_HOSPITAL_DATA_DIR, HOSPITALS_DIR_NAME, NAME_INDEX_DIR_NAME};
use crate::{HospitalError, HospitalResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which document store backs the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store; contents are lost on restart.
    Memory,
    /// JSON documents in a sharded directory tree under the data directory.
    Files,
}

impl FromStr for StoreBackend {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "files" | "file" => Ok(StoreBackend::Files),
            other => Err(HospitalError::UnknownStoreBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::Files => f.write_str("files"),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    backend: StoreBackend,
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if the file backend is selected with an empty
    /// data directory path.
    pub fn new(backend: StoreBackend, data_dir: PathBuf) -> HospitalResult<Self> {
        if backend == StoreBackend::Files && data_dir.as_os_str().is_empty() {
            return Err(HospitalError::InvalidInput(
                "data directory cannot be empty for the files backend".into(),
            ));
        }

        Ok(Self { backend, data_dir })
    }

    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn hospitals_dir(&self) -> PathBuf {
        self.data_dir.join(HOSPITALS_DIR_NAME)
    }

    pub fn name_index_dir(&self) -> PathBuf {
        self.data_dir.join(NAME_INDEX_DIR_NAME)
    }
}

/// Build a `CoreConfig` from optional raw environment values.
///
/// - `backend`: `memory` or `files`. When absent or blank, `files` is chosen if a data
///   directory was supplied and `memory` otherwise.
/// - `data_dir`: directory for the file store; defaults to [`DEFAULT_HOSPITAL_DATA_DIR`].
pub fn core_config_from_env_values(
    backend: Option<String>,
    data_dir: Option<String>,
) -> HospitalResult<CoreConfig> {
    let backend = backend
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let data_dir = data_dir
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let backend = match backend {
        Some(value) => value.parse::<StoreBackend>()?,
        None if data_dir.is_some() => StoreBackend::Files,
        None => StoreBackend::Memory,
    };

    let data_dir = data_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOSPITAL_DATA_DIR));

    CoreConfig::new(backend, data_dir)
}
