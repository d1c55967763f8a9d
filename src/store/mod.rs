//! SQLite storage boundary for the collection file.
//!
//! The collection is the user's only copy of irreplaceable data, so the
//! whole module is built around one rule: nothing becomes durable until
//! the session's single pending transaction is explicitly committed.

mod collection;
mod notes;

pub use collection::{Collection, MetaColumn};
pub use notes::{CardRow, NoteRow};

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors surfaced by the storage boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection file does not exist or could not be opened.
    #[error("couldn't open collection at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The collection metadata row is missing.
    #[error("couldn't read collection metadata")]
    MissingMeta,

    /// A note's model id has no entry in the model registry.
    #[error("no model schema found for model id {model_id}")]
    SchemaNotFound { model_id: i64 },

    /// The persisted tag registry blob failed to decode.
    #[error("couldn't decode tag registry: {0}")]
    MalformedRegistry(#[from] crate::domain::RegistryError),

    /// Supplied structured data (dump reload, model blob) failed to
    /// decode or validate.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A supplied search or tag pattern is not a valid regex.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Another process holds the store locked. Never retried; retry
    /// policy belongs to the caller.
    #[error("collection database is locked by another process")]
    Locked,

    /// Any other database error.
    #[error("database error: {0}")]
    Database(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
            {
                StoreError::Locked
            }
            _ => StoreError::Database(err),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
pub(crate) mod testutil;
