//! Durable local storage for session tokens.
//!
//! # Responsibility
//! - Open and configure the SQLite file backing local key-value storage.
//! - Apply schema migrations in deterministic order.
//! - Expose a small key-value contract (`LocalStorage`) to the session layer.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key is read or written before migrations succeed.
//! - This is the only durable state owned by the shell.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod local_storage;
pub mod migrations;
mod open;

pub use local_storage::{LocalStorage, SqliteLocalStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use open::{open_storage, open_storage_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "local storage error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "local storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
