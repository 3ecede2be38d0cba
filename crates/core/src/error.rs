use std::path::PathBuf;

/// Startup and configuration errors raised by the core crate.
///
/// Request-time failures have their own types: [`crate::store::StoreError`] for the
/// persistence layer and [`crate::gateway::GatewayError`] for the request boundary.
#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown store backend '{0}' (expected 'memory' or 'files')")]
    UnknownStoreBackend(String),
    #[error("failed to create data directory {path}: {source}", path = path.display())]
    DataDirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("data directory is not a directory: {}", .0.display())]
    DataDirNotDirectory(PathBuf),
}

pub type HospitalResult<T> = std::result::Result<T, HospitalError>;
