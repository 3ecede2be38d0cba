//! Record identifiers and sharded storage paths.
//!
//! Every stored hospital document is addressed by a [`RecordId`]: a v4 UUID held in
//! canonical form, **32 lowercase hexadecimal characters** with no hyphens
//! (for example `550e8400e29b41d4a716446655440000`).
//!
//! The file-backed store places each document under a sharded directory derived from
//! the identifier:
//!
//! `parent_dir/<id[0..2]>/<id[2..4]>/<id>/`
//!
//! so that no single directory grows without bound.

mod record_id;

pub use record_id::{RecordId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
